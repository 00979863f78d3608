//! Languages stream
//!
//! `GET /languages`: every language known to Transifex, as defined in CLDR.

use super::Stream;
use crate::schema::{Property, PropertyType, Schema};
use crate::tap::TapHandle;
use once_cell::sync::Lazy;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .property(
            Property::string("id")
                .required()
                .description("Language identifier."),
        )
        .property(
            Property::object(
                "attributes",
                Schema::new()
                    .property(
                        Property::string("code")
                            .required()
                            .description("The language code as defined in CLDR."),
                    )
                    .property(
                        Property::string("name")
                            .required()
                            .description("The name of the Language as defined in CLDR."),
                    )
                    .property(
                        Property::string("plural_equation")
                            .required()
                            .description("The language plural rule equation as defined in CLDR."),
                    )
                    .property(
                        Property::new("plural_rules", PropertyType::map_of(PropertyType::String))
                            .description("Object of plural rules for Language as defined in CLDR."),
                    )
                    .property(
                        Property::boolean("rtl")
                            .required()
                            .description("If the language is rlt."),
                    ),
            )
            .required()
            .description("Language attributes."),
        )
        .property(
            Property::object(
                "links",
                Schema::new().property(Property::string("self").required()),
            )
            .required()
            .description("Language links."),
        )
        .property(Property::string("type"))
});

/// Languages stream
#[derive(Debug, Clone)]
pub struct Languages {
    tap: TapHandle,
}

impl Languages {
    /// Bind the stream to a tap
    pub fn new(tap: TapHandle) -> Self {
        Self { tap }
    }
}

impl Stream for Languages {
    fn name(&self) -> &'static str {
        "languages"
    }

    fn path(&self) -> &'static str {
        "/languages"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn tap(&self) -> &TapHandle {
        &self.tap
    }
}
