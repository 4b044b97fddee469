//! WCAG reference table
//!
//! Static mapping from axe rule identifiers to the WCAG success criteria
//! they correspond to. Built once behind a `Lazy`; `lookup` is total over
//! all inputs and never returns an empty slice.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One WCAG success-criterion descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WcagReference {
    pub criteria: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

const CONTRAST_MINIMUM: WcagReference = WcagReference {
    criteria: "WCAG 1.4.3 Contrast (Minimum)",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum.html",
    description: "The visual presentation of text and images of text has a contrast ratio of at least 4.5:1.",
};

const NON_TEXT_CONTRAST: WcagReference = WcagReference {
    criteria: "WCAG 1.4.11 Non-text Contrast",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-contrast.html",
    description: "The visual presentation of UI components and graphical objects has a contrast ratio of at least 3:1.",
};

const NON_TEXT_CONTENT: WcagReference = WcagReference {
    criteria: "WCAG 1.1.1 Non-text Content",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content.html",
    description: "All non-text content that is presented to the user has a text alternative that serves the equivalent purpose.",
};

const INFO_AND_RELATIONSHIPS: WcagReference = WcagReference {
    criteria: "WCAG 1.3.1 Info and Relationships",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
    description: "Information, structure, and relationships conveyed through presentation can be programmatically determined.",
};

const NAME_ROLE_VALUE: WcagReference = WcagReference {
    criteria: "WCAG 4.1.2 Name, Role, Value",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value.html",
    description: "For all UI components, the name and role can be programmatically determined.",
};

const KEYBOARD: WcagReference = WcagReference {
    criteria: "WCAG 2.1.1 Keyboard",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/keyboard.html",
    description: "All functionality of the content is operable through a keyboard interface.",
};

const HEADINGS_AND_LABELS: WcagReference = WcagReference {
    criteria: "WCAG 2.4.6 Headings and Labels",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/headings-and-labels.html",
    description: "Headings and labels describe topic or purpose.",
};

const PAGE_TITLED: WcagReference = WcagReference {
    criteria: "WCAG 2.4.2 Page Titled",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/page-titled.html",
    description: "Web pages have titles that describe topic or purpose.",
};

const PARSING: WcagReference = WcagReference {
    criteria: "WCAG 4.1.1 Parsing",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/parsing.html",
    description: "In content implemented using markup languages, elements have complete start and end tags, elements are nested according to their specifications, elements do not contain duplicate attributes, and any IDs are unique.",
};

const LABELS_OR_INSTRUCTIONS: WcagReference = WcagReference {
    criteria: "WCAG 3.3.2 Labels or Instructions",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/labels-or-instructions.html",
    description: "Labels or instructions are provided when content requires user input.",
};

const LANGUAGE_OF_PAGE: WcagReference = WcagReference {
    criteria: "WCAG 3.1.1 Language of Page",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/language-of-page.html",
    description: "The default human language of each Web page can be programmatically determined.",
};

const LANGUAGE_OF_PARTS: WcagReference = WcagReference {
    criteria: "WCAG 3.1.2 Language of Parts",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/language-of-parts.html",
    description: "The human language of each passage or phrase in the content can be programmatically determined.",
};

const LINK_PURPOSE: WcagReference = WcagReference {
    criteria: "WCAG 2.4.4 Link Purpose (In Context)",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context.html",
    description: "The purpose of each link can be determined from the link text alone or from the link text together with its programmatically determined link context.",
};

const TIMING_ADJUSTABLE: WcagReference = WcagReference {
    criteria: "WCAG 2.2.1 Timing Adjustable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/timing-adjustable.html",
    description: "For each time limit that is set by the content, users can turn off, adjust, or extend the time limit.",
};

const CHANGE_ON_REQUEST: WcagReference = WcagReference {
    criteria: "WCAG 3.2.5 Change on Request",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/change-on-request.html",
    description: "Changes of context are initiated only by user request or a mechanism is available to turn off such changes.",
};

const RESIZE_TEXT: WcagReference = WcagReference {
    criteria: "WCAG 1.4.4 Resize text",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/resize-text.html",
    description: "Except for captions and images of text, text can be resized without assistive technology up to 200 percent without loss of content or functionality.",
};

const BYPASS_BLOCKS: WcagReference = WcagReference {
    criteria: "WCAG 2.4.1 Bypass Blocks",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/bypass-blocks.html",
    description: "A mechanism is available to bypass blocks of content that are repeated on multiple Web pages.",
};

const FOCUS_ORDER: WcagReference = WcagReference {
    criteria: "WCAG 2.4.3 Focus Order",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/focus-order.html",
    description: "If a Web page can be navigated sequentially and the navigation sequences affect meaning or operation, focusable components receive focus in an order that preserves meaning and operability.",
};

const CAPTIONS_PRERECORDED: WcagReference = WcagReference {
    criteria: "WCAG 1.2.2 Captions (Prerecorded)",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/captions-prerecorded.html",
    description: "Captions are provided for all prerecorded audio content in synchronized media.",
};

static UNKNOWN: [WcagReference; 1] = [WcagReference {
    criteria: "Unknown WCAG Criteria",
    url: "https://www.w3.org/WAI/WCAG21/quickref/",
    description: "Please refer to WCAG documentation for more information.",
}];

static TABLE: Lazy<HashMap<&'static str, &'static [WcagReference]>> = Lazy::new(|| {
    static COLOR_CONTRAST: [WcagReference; 2] = [CONTRAST_MINIMUM, NON_TEXT_CONTRAST];
    static IMAGE_ALT: [WcagReference; 1] = [NON_TEXT_CONTENT];
    static LABEL: [WcagReference; 2] = [INFO_AND_RELATIONSHIPS, NAME_ROLE_VALUE];
    static NAME_ROLE_VALUE_ONLY: [WcagReference; 1] = [NAME_ROLE_VALUE];
    static KEYBOARD_ONLY: [WcagReference; 1] = [KEYBOARD];
    static HEADING_ORDER: [WcagReference; 2] = [INFO_AND_RELATIONSHIPS, HEADINGS_AND_LABELS];
    static DOCUMENT_TITLE: [WcagReference; 1] = [PAGE_TITLED];
    static DUPLICATE_ID: [WcagReference; 1] = [PARSING];
    static MULTIPLE_LABELS: [WcagReference; 1] = [LABELS_OR_INSTRUCTIONS];
    static HTML_LANG: [WcagReference; 1] = [LANGUAGE_OF_PAGE];
    static LINK_NAME: [WcagReference; 2] = [NAME_ROLE_VALUE, LINK_PURPOSE];
    static STRUCTURE_ONLY: [WcagReference; 1] = [INFO_AND_RELATIONSHIPS];
    static META_REFRESH: [WcagReference; 2] = [TIMING_ADJUSTABLE, CHANGE_ON_REQUEST];
    static META_VIEWPORT: [WcagReference; 1] = [RESIZE_TEXT];
    static BYPASS: [WcagReference; 1] = [BYPASS_BLOCKS];
    static TABINDEX: [WcagReference; 1] = [FOCUS_ORDER];
    static VALID_LANG: [WcagReference; 1] = [LANGUAGE_OF_PARTS];
    static VIDEO_CAPTION: [WcagReference; 1] = [CAPTIONS_PRERECORDED];

    let mut table: HashMap<&'static str, &'static [WcagReference]> = HashMap::new();
    table.insert("color-contrast", &COLOR_CONTRAST);
    table.insert("image-alt", &IMAGE_ALT);
    table.insert("label", &LABEL);
    table.insert("aria-required-attr", &NAME_ROLE_VALUE_ONLY);
    table.insert("keyboard", &KEYBOARD_ONLY);
    table.insert("heading-order", &HEADING_ORDER);
    table.insert("aria-roles", &NAME_ROLE_VALUE_ONLY);
    table.insert("aria-valid-attr", &NAME_ROLE_VALUE_ONLY);
    table.insert("button-name", &NAME_ROLE_VALUE_ONLY);
    table.insert("document-title", &DOCUMENT_TITLE);
    table.insert("duplicate-id", &DUPLICATE_ID);
    table.insert("form-field-multiple-labels", &MULTIPLE_LABELS);
    table.insert("frame-title", &NAME_ROLE_VALUE_ONLY);
    table.insert("html-has-lang", &HTML_LANG);
    table.insert("html-lang-valid", &HTML_LANG);
    table.insert("input-button-name", &NAME_ROLE_VALUE_ONLY);
    table.insert("link-name", &LINK_NAME);
    table.insert("list", &STRUCTURE_ONLY);
    table.insert("listitem", &STRUCTURE_ONLY);
    table.insert("meta-refresh", &META_REFRESH);
    table.insert("meta-viewport", &META_VIEWPORT);
    table.insert("nested-interactive", &NAME_ROLE_VALUE_ONLY);
    table.insert("region", &BYPASS);
    table.insert("skip-link", &BYPASS);
    table.insert("tabindex", &TABINDEX);
    table.insert("table-duplicate-name", &STRUCTURE_ONLY);
    table.insert("table-fake-caption", &STRUCTURE_ONLY);
    table.insert("td-has-header", &STRUCTURE_ONLY);
    table.insert("th-has-data-cells", &STRUCTURE_ONLY);
    table.insert("valid-lang", &VALID_LANG);
    table.insert("video-caption", &VIDEO_CAPTION);
    table
});

/// Look up the WCAG references for a rule identifier.
///
/// Unknown identifiers fall back to a single generic entry pointing at the
/// WCAG quick reference, so the result is never empty.
pub fn lookup(rule_id: &str) -> &'static [WcagReference] {
    TABLE.get(rule_id).copied().unwrap_or(&UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("image-alt", "WCAG 1.1.1 Non-text Content")]
    #[test_case("color-contrast", "WCAG 1.4.3 Contrast (Minimum)")]
    #[test_case("document-title", "WCAG 2.4.2 Page Titled")]
    #[test_case("skip-link", "WCAG 2.4.1 Bypass Blocks")]
    #[test_case("video-caption", "WCAG 1.2.2 Captions (Prerecorded)")]
    fn known_rules_map_to_their_primary_criterion(rule: &str, criterion: &str) {
        assert_eq!(lookup(rule)[0].criteria, criterion);
    }

    #[test]
    fn multi_criterion_rules_keep_their_full_list() {
        let refs = lookup("link-name");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].criteria, "WCAG 2.4.4 Link Purpose (In Context)");
    }

    #[test]
    fn unknown_rule_falls_back_to_quickref() {
        let refs = lookup("definitely-not-a-rule");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].criteria, "Unknown WCAG Criteria");
        assert!(refs[0].url.contains("quickref"));
    }

    #[test]
    fn no_entry_is_empty() {
        for (rule, refs) in TABLE.iter() {
            assert!(!refs.is_empty(), "empty reference list for {}", rule);
        }
    }
}
