//! Pure builders for the segment browser's sidebar and annotation pane.

use cb_core::format::{commentary_class, truncate_label, LABEL_LIMIT};
use cb_core::html::{Element, Node};
use cb_core::types::{Annotation, SegmentDetail, SegmentSummary};

use crate::dom::error_message;

pub const NOT_FOUND: &str = "세그먼트를 찾을 수 없습니다.";
pub const NO_ANNOTATIONS: &str = "이 세그먼트에 주석이 없습니다.";
pub const ANNOTATION_NOT_FOUND: &str = "주석을 찾을 수 없습니다.";

pub const ITEM_CLASS: &str = "segment-item";
pub const ACTIVE_CLASS: &str = "active";
pub const SEGMENT_ID_ATTR: &str = "data-seg-id";

pub fn sidebar(segments: &[SegmentSummary]) -> Vec<Node> {
    vec![
        Element::new("h2").text("세그먼트").into(),
        Element::new("ul")
            .class("segment-list")
            .children(segments.iter().map(sidebar_item))
            .into(),
    ]
}

fn sidebar_item(segment: &SegmentSummary) -> Element {
    let label = segment.display_label();
    Element::new("li")
        .class(ITEM_CLASS)
        .attr(SEGMENT_ID_ATTR, segment.id.as_str())
        .child(
            Element::new("span")
                .class("segment-label")
                .attr("title", label)
                .text(truncate_label(label, LABEL_LIMIT)),
        )
        .child(
            Element::new("span")
                .class("segment-count")
                .text(segment.annotation_count.to_string()),
        )
}

/// Re-scan every rendered sidebar row and mark only the one for `active_id`.
pub fn highlight(sidebar: &mut Element, active_id: &str) {
    sidebar.walk_mut(&mut |el| {
        if el.has_class(ITEM_CLASS) {
            let on = el.get_attr(SEGMENT_ID_ATTR) == Some(active_id);
            el.toggle_class(ACTIVE_CLASS, on);
        }
    });
}

pub fn segment_view(detail: &SegmentDetail) -> Vec<Node> {
    let segment = &detail.segment;
    let mut header = Element::new("div")
        .class("segment-header")
        .child(Element::new("span").class("segment-id-badge").text(segment.id.as_str()))
        .child(Element::new("div").class("segment-ref-text").text(segment.reference()));
    if let Some(ko) = segment.ref_text_ko.as_deref().filter(|s| !s.is_empty()) {
        header.push(Element::new("div").class("segment-ref-ko").text(ko));
    }

    let body = if detail.annotations.is_empty() {
        error_message(NO_ANNOTATIONS)
    } else {
        Element::new("div")
            .class("annotations-container")
            .children(detail.annotations.iter().map(annotation_card))
            .into()
    };

    vec![header.into(), body]
}

pub fn not_found() -> Vec<Node> {
    vec![error_message(NOT_FOUND)]
}

/// A single annotation on its own, outside any segment.
pub fn annotation_view(annotation: &Annotation) -> Vec<Node> {
    vec![Element::new("div")
        .class("annotations-container")
        .child(annotation_card(annotation))
        .into()]
}

pub fn annotation_not_found() -> Vec<Node> {
    vec![error_message(ANNOTATION_NOT_FOUND)]
}

pub fn annotation_card(annotation: &Annotation) -> Element {
    let mut tag = Element::new("span")
        .class("commentator-tag")
        .child(Element::new("strong").text(annotation.display_name()));
    if let Some(era) = non_empty(&annotation.era) {
        tag.push(Node::text(" "));
        tag.push(Element::new("span").class("era-tag").text(era));
    }
    if let Some(years) = non_empty(&annotation.life_years) {
        tag.push(Node::text(" "));
        tag.push(Element::new("span").class("life-years").text(years));
    }

    let commentary_type = annotation.commentary_type.as_deref();
    let badge = Element::new("span")
        .class("commentary-type-badge")
        .class(&format!("type-{}", commentary_class(commentary_type)))
        .text(commentary_type.unwrap_or(""));

    let mut card = Element::new("div")
        .class("annotation-card")
        .child(Element::new("div").class("annotation-header").child(tag).child(badge));

    if let Some(source) = non_empty(&annotation.source) {
        card.push(Element::new("div").class("annotation-source").text(source));
    }
    card.push(
        Element::new("div")
            .class("annotation-text")
            .text(annotation.text.as_deref().unwrap_or("")),
    );
    if let Some(translation) = non_empty(&annotation.translation_ko) {
        card.push(Element::new("div").class("annotation-translation").text(translation));
    }
    card
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotation(value: serde_json::Value) -> Annotation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_card_layout() {
        let html = annotation_card(&annotation(json!({
            "commentator": "zhuxi",
            "commentator_name": "朱熹",
            "era": "宋",
            "life_years": "1130-1200",
            "commentary_type": "集注",
            "source": "論語集注",
            "text": "學之爲言效也",
            "translation_ko": "학은 본받는다는 뜻이다"
        })))
        .to_string();
        assert_eq!(
            html,
            "<div class=\"annotation-card\"><div class=\"annotation-header\">\
             <span class=\"commentator-tag\"><strong>朱熹</strong> <span class=\"era-tag\">宋</span> \
             <span class=\"life-years\">1130-1200</span></span>\
             <span class=\"commentary-type-badge type-jizhu\">集注</span></div>\
             <div class=\"annotation-source\">論語集注</div>\
             <div class=\"annotation-text\">學之爲言效也</div>\
             <div class=\"annotation-translation\">학은 본받는다는 뜻이다</div></div>"
        );
    }

    #[test]
    fn test_minimal_card() {
        let html = annotation_card(&annotation(json!({"commentator": "何晏"}))).to_string();
        assert!(html.contains("<strong>何晏</strong></span>"));
        assert!(html.contains("<span class=\"commentary-type-badge type-other\"></span>"));
        assert!(html.contains("<div class=\"annotation-text\"></div>"));
        assert!(!html.contains("annotation-source"));
        assert!(!html.contains("annotation-translation"));
        assert!(!html.contains("era-tag"));
    }

    #[test]
    fn test_card_text_is_not_interpreted() {
        let html = annotation_card(&annotation(json!({
            "commentator": "<img src=x>",
            "text": "<script>x</script>"
        })))
        .to_string();
        assert!(html.contains("<strong>&lt;img src=x&gt;</strong>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let segments: Vec<SegmentSummary> = serde_json::from_value(json!([
            {"id": "1", "annotation_count": 2},
            {"id": "2", "annotation_count": 0},
            {"id": "3", "annotation_count": 1}
        ]))
        .unwrap();
        let mut root = Element::new("div").children(sidebar(&segments));

        highlight(&mut root, "1");
        highlight(&mut root, "3");
        let active = root.find_by_class(ACTIVE_CLASS);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].get_attr(SEGMENT_ID_ATTR), Some("3"));
    }
}
