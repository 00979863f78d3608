//! I18n formats stream
//!
//! `GET /i18n_formats?filter[organization]=<id>`: file formats available to
//! one organization. Child of [`Organizations`](super::Organizations).

use super::{Stream, StreamContext};
use crate::pagination::PageToken;
use crate::schema::{Property, PropertyType, Schema};
use crate::tap::TapHandle;
use crate::types::QueryParams;
use once_cell::sync::Lazy;

/// Query parameter scoping requests to one organization
pub const ORGANIZATION_FILTER: &str = "filter[organization]";

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .property(
            Property::object(
                "attributes",
                Schema::new()
                    .property(
                        Property::string("description")
                            .required()
                            .description("The i18n_type description."),
                    )
                    .property(
                        Property::new(
                            "file_extensions",
                            PropertyType::array_of(PropertyType::String),
                        )
                        .required()
                        .description("The file name extension association to the media_type."),
                    )
                    .property(Property::string("media_type").required().description(
                        "A two-part identifier for file formats and format contents \
                         transmitted.",
                    ))
                    .property(
                        Property::string("name")
                            .required()
                            .description("The name of the i18n format."),
                    ),
            )
            .required()
            .description("I18n format attributes."),
        )
        .property(
            Property::string("id")
                .required()
                .description("I18n format identifier."),
        )
        .property(Property::string("type"))
        .property(Property::string("organization_id").description("Organization ID."))
});

/// I18n formats stream
#[derive(Debug, Clone)]
pub struct I18nFormats {
    tap: TapHandle,
}

impl I18nFormats {
    /// Bind the stream to a tap
    pub fn new(tap: TapHandle) -> Self {
        Self { tap }
    }
}

impl Stream for I18nFormats {
    fn name(&self) -> &'static str {
        "i18n_formats"
    }

    fn path(&self) -> &'static str {
        "/i18n_formats"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn tap(&self) -> &TapHandle {
        &self.tap
    }

    fn parent_stream(&self) -> Option<&'static str> {
        Some("organizations")
    }

    fn get_url_params(
        &self,
        context: Option<&StreamContext>,
        next_page_token: Option<&PageToken>,
    ) -> QueryParams {
        let mut params = super::base_url_params(next_page_token);

        // The cursor URL already carries the filter on later pages
        let has_filter = params.iter().any(|(k, _)| k == ORGANIZATION_FILTER);
        if !has_filter {
            if let Some(org) = context.and_then(StreamContext::organization_id) {
                params.push((ORGANIZATION_FILTER.to_string(), org.to_string()));
            }
        }
        params
    }
}
