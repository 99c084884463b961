/// Panel bodies arrive as plain text with embedded template-fragment
/// markers. A deployed fragment is rendered inline between its markers;
/// a missing one is a single marker line for a template the server
/// knows about but that has not been created yet:
///
/// ```text
/// @template header
/// ...rendered body lines...
/// @end
/// @template-missing footer
/// ```
const FRAGMENT_OPEN: &str = "@template ";
const FRAGMENT_MISSING: &str = "@template-missing ";
const FRAGMENT_CLOSE: &str = "@end";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDoc {
    pub blocks: Vec<PanelBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBlock {
    /// One line of plain panel text.
    Text(String),
    Fragment(TemplateFragment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFragment {
    /// Sanitized name, safe for use as a URL path segment.
    pub name: String,
    pub deployed: bool,
    pub body: Vec<String>,
}

/// Strip embedded line breaks from a template name before it is used in
/// a URL path segment. Names come out of rendered markup and can carry
/// wrapped-line artifacts.
pub fn sanitize_template_name(raw: &str) -> String {
    raw.replace(['\r', '\n'], "")
}

/// Unclosed fragments are closed at end of input.
pub fn parse_panel(raw: &str) -> PanelDoc {
    let mut blocks = Vec::new();
    let mut open: Option<TemplateFragment> = None;

    for line in raw.split('\n') {
        if let Some(fragment) = open.as_mut() {
            if line.trim_end() == FRAGMENT_CLOSE {
                blocks.push(PanelBlock::Fragment(
                    open.take().expect("fragment is open"),
                ));
            } else {
                fragment.body.push(line.to_string());
            }
            continue;
        }

        if let Some(name) = line.strip_prefix(FRAGMENT_MISSING) {
            blocks.push(PanelBlock::Fragment(TemplateFragment {
                name: sanitize_template_name(name),
                deployed: false,
                body: Vec::new(),
            }));
        } else if let Some(name) = line.strip_prefix(FRAGMENT_OPEN) {
            open = Some(TemplateFragment {
                name: sanitize_template_name(name),
                deployed: true,
                body: Vec::new(),
            });
        } else {
            blocks.push(PanelBlock::Text(line.to_string()));
        }
    }

    if let Some(fragment) = open.take() {
        blocks.push(PanelBlock::Fragment(fragment));
    }
    PanelDoc { blocks }
}
