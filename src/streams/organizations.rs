//! Organizations stream
//!
//! `GET /organizations`: organizations the token can see. Each organization
//! is the parent of one i18n formats chain.

use super::{Stream, StreamContext};
use crate::error::{Error, Result};
use crate::schema::{Property, Schema};
use crate::tap::TapHandle;
use once_cell::sync::Lazy;
use serde_json::Value;

fn related_links() -> Schema {
    Schema::new().property(Property::object(
        "links",
        Schema::new().property(Property::string("related")),
    ))
}

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .property(
            Property::object(
                "attributes",
                Schema::new()
                    .property(Property::string("logo_url").description("The organization logo url."))
                    .property(
                        Property::string("name")
                            .required()
                            .description("The organization name."),
                    )
                    .property(Property::boolean("private").description(
                        "Private organization. A private organization is \
                         visible only by you and your team.",
                    ))
                    .property(
                        Property::string("slug")
                            .required()
                            .description("The organization slug."),
                    ),
            )
            .required()
            .description("Organization attributes."),
        )
        .property(
            Property::string("id")
                .required()
                .description("Organization identifier."),
        )
        .property(
            Property::object(
                "links",
                Schema::new().property(Property::string("self").required()),
            )
            .required()
            .description("Organization links."),
        )
        .property(Property::object(
            "relationships",
            Schema::new()
                .property(Property::object("projects", related_links()))
                .property(Property::object("teams", related_links())),
        ))
        .property(Property::string("type"))
});

/// Organizations stream
#[derive(Debug, Clone)]
pub struct Organizations {
    tap: TapHandle,
}

impl Organizations {
    /// Bind the stream to a tap
    pub fn new(tap: TapHandle) -> Self {
        Self { tap }
    }
}

impl Stream for Organizations {
    fn name(&self) -> &'static str {
        "organizations"
    }

    fn path(&self) -> &'static str {
        "/organizations"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn tap(&self) -> &TapHandle {
        &self.tap
    }

    fn is_parent(&self) -> bool {
        true
    }

    fn generate_child_contexts(
        &self,
        record: &Value,
        _context: Option<&StreamContext>,
    ) -> Result<Vec<StreamContext>> {
        let id = record.get("id").and_then(Value::as_str).ok_or_else(|| {
            Error::decode("organization record has no string 'id' to scope child streams")
        })?;
        Ok(vec![StreamContext::organization(id)])
    }
}
