//! Wire shapes of the upstream image-analysis API.
//!
//! Every field is best-effort optional: absent on the wire decodes to `None`,
//! `None` is not re-emitted, and unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image passed by reference. The request body of every POST tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Publicly reachable URL of an image.
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

/// Result of `/analyze`: every visual feature the caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult: Option<AdultInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ImageTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ImageDescriptionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<FaceDescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<DetectedObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<DetectedBrand>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Result of `/describe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ImageDescriptionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Content tags plus captions sorted by confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<Vec<ImageCaption>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCaption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Optional hint or detail for this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Result of `/tag`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ImageTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Result of `/detect`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<DetectedObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<BoundingRect>,
    /// Label for the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ObjectHierarchy>,
}

/// One level of an object's classification lineage. Each node owns its
/// parent, so a chain is acyclic.
///
/// The type itself has no depth cap, but `serde_json` stops at 128 levels
/// of nesting when decoding. A response with a deeper chain fails to decode
/// as this type and is passed through as raw text instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectHierarchy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<ObjectHierarchy>>,
}

impl ObjectHierarchy {
    /// Labels from this node up to the root, nearest first.
    pub fn lineage(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            if let Some(label) = current.object.as_deref() {
                labels.push(label);
            }
            node = current.parent.as_deref();
        }
        labels
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedBrand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<BoundingRect>,
}

/// Area inside an image, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i32>,
}

/// Face location in pixels. Same geometry as [`BoundingRect`] but a distinct
/// upstream shape with its own field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRectangle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_rectangle: Option<FaceRectangle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebritiesModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_rectangle: Option<FaceRectangle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarksModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<CategoryDetail>,
}

/// Domain-specific details attached to a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebrities: Option<Vec<CelebritiesModel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<LandmarksModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_color_foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_color_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(rename = "isBWImg", skip_serializing_if = "Option::is_none")]
    pub is_bw_img: Option<bool>,
}

/// Clip-art and line-drawing confidence levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_art_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_drawing_type: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_adult_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_racy_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub racy_score: Option<f64>,
}

/// Result of `/ocr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    /// BCP-47 language code of the recognized text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Degrees of rotation relative to the nearest horizontal or vertical.
    /// Absent when the angle could not be detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_angle: Option<f64>,
    /// Direction the top of the text faces: up, down, left or right.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<OcrRegion>>,
}

/// A region of recognized text. Bounding boxes are comma-separated
/// `left,top,width,height` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<OcrLine>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<OcrWord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrWord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Model-specific payload of the `celebrities` domain model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrityResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebrities: Option<Vec<CelebritiesModel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Model-specific payload of the `landmarks` domain model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<LandmarksModel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Result of `/areaOfInterest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaOfInterestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_interest: Option<BoundingRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Result of `/models/{model}`. The `result` object is free-form and
/// depends on the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainModelResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

impl DomainModelResults {
    /// Decode the model-specific payload, e.g. into [`CelebrityResults`].
    /// A missing payload decodes as an empty object.
    pub fn parse_result<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let payload = self.result.clone().unwrap_or_default();
        serde_json::from_value(Value::Object(payload))
    }
}

/// Result of `GET /models`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListModelsResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelDescription>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Error envelope returned by the upstream service on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerVisionError {
    /// Opaque: upstream sends either a string or a number.
    #[serde(default)]
    pub code: Value,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_analysis() {
        let body = json!({
            "categories": [{
                "name": "people_",
                "score": 0.8,
                "detail": {"celebrities": [{
                    "name": "Jane Doe",
                    "confidence": 0.99,
                    "faceRectangle": {"left": 10, "top": 20, "width": 30, "height": 40}
                }]}
            }],
            "color": {"dominantColors": ["Black"], "isBWImg": true, "accentColor": "1A2B3C"},
            "imageType": {"clipArtType": 0, "lineDrawingType": 1},
            "faces": [{"age": 31, "gender": "Female", "faceRectangle": {"left": 1, "top": 2, "width": 3, "height": 4}}],
            "requestId": "r-1",
            "metadata": {"format": "Jpeg", "width": 640, "height": 480}
        });

        let analysis: ImageAnalysis = serde_json::from_value(body).unwrap();
        let category = &analysis.categories.as_ref().unwrap()[0];
        let celebrity = &category.detail.as_ref().unwrap().celebrities.as_ref().unwrap()[0];
        assert_eq!(celebrity.name.as_deref(), Some("Jane Doe"));
        assert_eq!(celebrity.face_rectangle.unwrap().height, Some(40));
        assert_eq!(analysis.color.as_ref().unwrap().is_bw_img, Some(true));
        assert_eq!(analysis.image_type.unwrap().line_drawing_type, Some(1));
        assert_eq!(analysis.request_id.as_deref(), Some("r-1"));
        assert_eq!(analysis.metadata.unwrap().width, Some(640));
        assert!(analysis.tags.is_none());
    }

    #[test]
    fn absent_fields_are_not_emitted() {
        let result = TagResult {
            request_id: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"requestId": "abc"}));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result: AreaOfInterestResult = serde_json::from_value(json!({
            "areaOfInterest": {"x": 1, "y": 2, "w": 3, "h": 4},
            "modelVersion": "2021-05-01"
        }))
        .unwrap();
        assert_eq!(
            result.area_of_interest,
            Some(BoundingRect { x: Some(1), y: Some(2), w: Some(3), h: Some(4) })
        );
    }

    #[test]
    fn object_hierarchy_nests_without_limit() {
        let mut parent = json!({"object": "level-0"});
        for depth in 1..=12 {
            parent = json!({"object": format!("level-{depth}"), "parent": parent});
        }
        let object: DetectedObject =
            serde_json::from_value(json!({"object": "leaf", "parent": parent})).unwrap();

        let lineage = object.parent.as_ref().unwrap().lineage();
        assert_eq!(lineage.len(), 13);
        assert_eq!(lineage.first(), Some(&"level-12"));
        assert_eq!(lineage.last(), Some(&"level-0"));
    }

    #[test]
    fn domain_results_parse_into_typed_payload() {
        let results: DomainModelResults = serde_json::from_value(json!({
            "result": {"landmarks": [{"name": "Eiffel Tower", "confidence": 0.97}]},
            "requestId": "r-2"
        }))
        .unwrap();

        let landmarks: LandmarkResults = results.parse_result().unwrap();
        let landmarks = landmarks.landmarks.unwrap();
        let first = &landmarks[0];
        assert_eq!(first.name.as_deref(), Some("Eiffel Tower"));

        let celebrities: CelebrityResults = results.parse_result().unwrap();
        assert!(celebrities.celebrities.is_none());
    }

    #[test]
    fn error_envelope_accepts_any_code() {
        let err: ComputerVisionError = serde_json::from_value(json!({
            "code": "InvalidImageUrl",
            "message": "Image URL is badly formatted."
        }))
        .unwrap();
        assert_eq!(err.code, json!("InvalidImageUrl"));

        let err: ComputerVisionError =
            serde_json::from_value(json!({"code": 429, "message": "slow down", "requestId": "x"}))
                .unwrap();
        assert_eq!(err.code, json!(429));
        assert_eq!(err.request_id.as_deref(), Some("x"));
    }

    #[test]
    fn image_url_reencodes_stably() {
        let first: ImageUrl =
            serde_json::from_value(json!({"url": "https://example.com/cat.jpg"})).unwrap();
        let bytes = serde_json::to_vec(&first).unwrap();
        let second: ImageUrl = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(first, second);
    }

    fn nested_hierarchy(depth: usize) -> String {
        format!(
            "{}{{\"object\":\"root\"}}{}",
            r#"{"object":"node","parent":"#.repeat(depth),
            "}".repeat(depth)
        )
    }

    #[test]
    fn hierarchy_depth_is_bounded_by_the_decoder() {
        let shallow: ObjectHierarchy = serde_json::from_str(&nested_hierarchy(100)).unwrap();
        assert_eq!(shallow.lineage().len(), 101);
        assert_eq!(shallow.lineage().last(), Some(&"root"));

        let err = serde_json::from_str::<ObjectHierarchy>(&nested_hierarchy(200)).unwrap_err();
        assert!(err.to_string().contains("recursion limit"), "{err}");
    }
}
