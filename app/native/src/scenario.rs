//! Scenario files for `lumen simulate`.
//!
//! A scenario describes a page (viewport, capabilities, element tree with
//! document-space layout boxes) and a script of user steps. Files are JSONC.
//!
//! ```jsonc
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "capabilities": { "prefersReducedMotion": false },
//!   "lang": "en",
//!   "elements": [
//!     { "tag": "header", "classes": ["header"], "rect": { "height": 80, "width": 1280 } }
//!   ],
//!   "steps": [{ "scroll": 500 }, { "frame": 1 }, { "click": "#navToggle" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::LumenError;
use crate::platform::{Capabilities, Document, ElementId, MemoryPage, Rect, Size};

/// An element of the scenario page.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioElement {
    /// Tag name.
    pub tag: String,
    /// Element id.
    pub id: Option<String>,
    /// Classes.
    pub classes: Vec<String>,
    /// Attributes other than `id` and `class`.
    pub attributes: BTreeMap<String, String>,
    /// Layout box in document coordinates, or viewport coordinates if `fixed`.
    pub rect: Option<Rect>,
    /// Whether the element is positioned relative to the viewport.
    pub fixed: bool,
    /// Child elements.
    pub children: Vec<ScenarioElement>,
}

impl Default for ScenarioElement {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            rect: None,
            fixed: false,
            children: Vec::new(),
        }
    }
}

/// Text field update.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FieldInput {
    /// Selector of the field.
    pub selector: String,
    /// New value.
    pub value: String,
}

/// Click at an explicit viewport position.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClickAt {
    /// Selector of the click target.
    pub target: String,
    /// Horizontal position (px).
    pub x: f64,
    /// Vertical position (px).
    pub y: f64,
}

/// One scripted user step.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Scroll the window to an offset.
    Scroll(f64),
    /// Move the pointer to `[x, y]`.
    Pointer([f64; 2]),
    /// Resize the viewport.
    Resize(Size),
    /// Deliver this many display refreshes.
    Frame(usize),
    /// Deliver refreshes until nothing is pending.
    Settle,
    /// Click the center of the first element matching a selector.
    Click(String),
    /// Click an element at an explicit position.
    ClickAt(ClickAt),
    /// Press a key.
    Key(String),
    /// Submit a form.
    Submit(String),
    /// Type into a field.
    Field(FieldInput),
}

/// A page and a script of steps.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    /// Viewport size.
    pub viewport: Size,
    /// Platform capabilities.
    pub capabilities: Capabilities,
    /// Document language (`lang` on the root element).
    pub lang: Option<String>,
    /// Elements appended to the body.
    pub elements: Vec<ScenarioElement>,
    /// Steps to replay.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parses a JSONC scenario.
    ///
    /// # Errors
    ///
    /// Returns `LumenError::ScenarioError` if the text is not a valid scenario.
    pub fn parse(text: &str) -> Result<Self, LumenError> {
        let reader = json_comments::StripComments::new(text.as_bytes());
        serde_json::from_reader(reader).map_err(|err| LumenError::ScenarioError(err.to_string()))
    }

    /// Loads a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, LumenError> {
        let text = fs::read_to_string(path)
            .map_err(|err| LumenError::ScenarioError(format!("{}: {err}", path.display())))?;
        Self::parse(&text)
    }

    /// Builds the in-memory page described by the scenario.
    #[must_use]
    pub fn build_page(&self) -> MemoryPage {
        let mut page = MemoryPage::new(self.viewport);
        if let Some(lang) = &self.lang {
            let root = page.root();
            page.seed_attribute(root, "lang", lang);
        }
        let body = page.body();
        for element in &self.elements {
            add_element(&mut page, body, element);
        }
        page
    }
}

fn add_element(page: &mut MemoryPage, parent: ElementId, element_def: &ScenarioElement) {
    let classes: Vec<&str> = element_def.classes.iter().map(String::as_str).collect();
    let element = page.add_element(parent, &element_def.tag, element_def.id.as_deref(), &classes, None);
    if let Some(rect) = element_def.rect {
        page.set_rect(element, rect, element_def.fixed);
    }
    for (name, value) in &element_def.attributes {
        page.seed_attribute(element, name, value);
    }
    for child in &element_def.children {
        add_element(page, element, child);
    }
}
