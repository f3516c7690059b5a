//! Handlers for the description and the base tags.

use crate::model::{split_comment, Element, ElementBody, Segment, COMMENT_TAG};
use crate::tags::Handler;
use crate::token;

/// Handler for the description or a base tag.
pub(crate) fn handler(tag: &str) -> Option<Handler> {
    let handler: Handler = match tag {
        COMMENT_TAG => process_comment,
        "see" => process_see,
        "link" => process_link,
        "deprecated" => process_deprecated,
        "since" => process_since,
        _ => return None,
    };
    Some(handler)
}

pub fn process_comment(seg: Segment<'_>) -> Option<Element> {
    let (short, long) = split_comment(&token::join(seg.tokens));
    Some(seg.into_element(ElementBody::Comment { short, long }))
}

pub fn process_see(seg: Segment<'_>) -> Option<Element> {
    process_value(seg)
}

pub fn process_link(seg: Segment<'_>) -> Option<Element> {
    process_value(seg)
}

pub fn process_deprecated(seg: Segment<'_>) -> Option<Element> {
    process_value(seg)
}

pub fn process_since(seg: Segment<'_>) -> Option<Element> {
    process_value(seg)
}

/// Plain-value element: the segment text, trimmed.
pub fn process_value(seg: Segment<'_>) -> Option<Element> {
    Some(seg.into_element(ElementBody::Value {
        content: seg.content(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::normalize;

    #[test]
    fn base_tags_have_handlers() {
        for tag in ["comment", "see", "link", "deprecated", "since"] {
            assert!(handler(tag).is_some(), "missing handler for {tag}");
        }
        assert!(handler("param").is_none());
    }

    #[test]
    fn value_handler_trims() {
        let tokens = normalize(" * 1.2.0 \n *");
        let seg = Segment {
            tag: "since",
            tokens: &tokens,
            previous: None,
            line: 1,
        };
        let element = process_since(seg).unwrap();
        assert_eq!(
            element.body(),
            &ElementBody::Value {
                content: "1.2.0".into()
            }
        );
    }
}
