// libs/video-api-cell/src/models/layout.rs
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::enums::{lenient, ScreenLayoutType};
use crate::validation::require;

/// Visual arrangement of streams in a composed archive or broadcast.
///
/// Layout types the client does not know decode to `None`; such a layout
/// only fails when it is validated for sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCompositionLayout {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    layout_type: Option<ScreenLayoutType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stylesheet: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    screenshare_type: Option<ScreenLayoutType>,
}

impl StreamCompositionLayout {
    pub fn builder() -> StreamCompositionLayoutBuilder {
        StreamCompositionLayoutBuilder::default()
    }

    pub fn layout_type(&self) -> Option<ScreenLayoutType> {
        self.layout_type
    }

    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    pub fn screenshare_type(&self) -> Option<ScreenLayoutType> {
        self.screenshare_type
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        let layout_type = require(self.layout_type, "type")?;

        if let Some(screenshare_type) = self.screenshare_type {
            if layout_type != ScreenLayoutType::BestFit {
                return Err(VideoApiError::illegal_state(
                    "screenshareType can only be set when type is bestFit",
                ));
            }
            if screenshare_type == ScreenLayoutType::Custom {
                return Err(VideoApiError::invalid(
                    "screenshareType",
                    "screenshareType cannot be custom",
                ));
            }
        }

        let has_stylesheet = self
            .stylesheet
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());

        match (layout_type, self.stylesheet.is_some()) {
            (ScreenLayoutType::Custom, _) if !has_stylesheet => {
                Err(VideoApiError::missing("stylesheet"))
            }
            (ScreenLayoutType::Custom, _) | (_, false) => Ok(()),
            _ => Err(VideoApiError::illegal_state(
                "stylesheet can only be set when type is custom",
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StreamCompositionLayoutBuilder {
    layout_type: Option<ScreenLayoutType>,
    stylesheet: Option<String>,
    screenshare_type: Option<ScreenLayoutType>,
}

impl StreamCompositionLayoutBuilder {
    pub fn layout_type(mut self, layout_type: ScreenLayoutType) -> Self {
        self.layout_type = Some(layout_type);
        self
    }

    /// CSS for the `custom` layout type.
    pub fn stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    /// Layout applied while a screenshare stream is present; `bestFit` only.
    pub fn screenshare_type(mut self, screenshare_type: ScreenLayoutType) -> Self {
        self.screenshare_type = Some(screenshare_type);
        self
    }

    pub fn build(self) -> Result<StreamCompositionLayout, VideoApiError> {
        let layout = StreamCompositionLayout {
            layout_type: self.layout_type,
            stylesheet: self.stylesheet,
            screenshare_type: self.screenshare_type,
        };
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_custom_requires_stylesheet() {
        let result = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::Custom)
            .build();
        assert_matches!(result, Err(VideoApiError::MissingField { field: "stylesheet" }));
    }

    #[test]
    fn test_custom_serializes_stylesheet() {
        let layout = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::Custom)
            .stylesheet("stream.instructor {position: absolute;}")
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_string(&layout).unwrap(),
            r#"{"type":"custom","stylesheet":"stream.instructor {position: absolute;}"}"#
        );
    }

    #[test]
    fn test_stylesheet_forbidden_for_predefined_types() {
        let result = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::Pip)
            .stylesheet("a {}")
            .build();
        assert_matches!(result, Err(VideoApiError::IllegalState { .. }));
    }

    #[test]
    fn test_type_is_required() {
        let result = StreamCompositionLayout::builder().build();
        assert_matches!(result, Err(VideoApiError::MissingField { field: "type" }));
    }

    #[test]
    fn test_screenshare_type_rules() {
        let layout = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::BestFit)
            .screenshare_type(ScreenLayoutType::Pip)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&layout).unwrap(),
            serde_json::json!({"type": "bestFit", "screenshareType": "pip"})
        );

        let wrong_type = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::Horizontal)
            .screenshare_type(ScreenLayoutType::Pip)
            .build();
        assert_matches!(wrong_type, Err(VideoApiError::IllegalState { .. }));

        let custom_screenshare = StreamCompositionLayout::builder()
            .layout_type(ScreenLayoutType::BestFit)
            .screenshare_type(ScreenLayoutType::Custom)
            .build();
        assert_matches!(custom_screenshare, Err(VideoApiError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unknown_types_decode_to_none() {
        let layout: StreamCompositionLayout = serde_json::from_value(serde_json::json!({
            "type": "hologram",
            "screenshareType": "newThing"
        }))
        .unwrap();

        assert_eq!(layout.layout_type(), None);
        assert_eq!(layout.screenshare_type(), None);
        assert_matches!(layout.validate(), Err(VideoApiError::MissingField { field: "type" }));
    }
}
