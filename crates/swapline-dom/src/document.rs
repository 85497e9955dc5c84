//! Document surface
//!
//! [`Document`] is the subset of DOM behaviour the navigation core depends on.
//! [`MemoryDocument`] keeps the markup as serialized HTML and re-parses it with
//! `scraper` for every query, which keeps it `Send + Sync` behind a mutex.

use parking_lot::Mutex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use crate::element::Element;
use crate::error::DomError;
use crate::Result;

pub trait Document: Send + Sync {
    /// Current document title
    fn title(&self) -> String;

    /// Replace the contents of the first element matching `selector` with an
    /// HTML fragment.
    fn replace_contents(&self, selector: &str, fragment: &str) -> Result<()>;

    /// Remove the element with the given id and return its value.
    ///
    /// Returns `Ok(None)` when no such element exists.
    fn take_element_value(&self, id: &str) -> Result<Option<String>>;

    /// Data value recorded on the root element
    fn root_data(&self, key: &str) -> Option<String>;

    fn set_root_data(&self, key: &str, value: &str);

    fn add_root_class(&self, class: &str);

    fn remove_root_class(&self, class: &str);

    /// Reset the viewport scroll position to the top
    fn scroll_to_top(&self);
}

struct DocumentState {
    markup: String,
    root_classes: Vec<String>,
    root_data: HashMap<String, String>,
    scroll_top: u32,
}

/// Headless document backed by `scraper`
pub struct MemoryDocument {
    state: Mutex<DocumentState>,
}

impl MemoryDocument {
    /// Parse a full HTML document.
    ///
    /// Classes and `data-*` attributes of the root `<html>` element seed the
    /// root class list and the root data map.
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let root = html.root_element();

        let root_classes = root.value().classes().map(str::to_string).collect();
        let root_data = root
            .value()
            .attrs()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|key| (key.to_string(), value.to_string()))
            })
            .collect();

        Self {
            state: Mutex::new(DocumentState {
                markup: html.html(),
                root_classes,
                root_data,
                scroll_top: 0,
            }),
        }
    }

    /// Inner HTML of the first element matching `selector`
    pub fn inner_html(&self, selector: &str) -> Result<Option<String>> {
        let html = self.snapshot();
        Ok(select_first(&html, selector)?.map(|el| el.inner_html()))
    }

    /// Whitespace-normalized text of the first element matching `selector`
    pub fn text(&self, selector: &str) -> Result<Option<String>> {
        let html = self.snapshot();
        Ok(select_first(&html, selector)?.map(element_text))
    }

    pub fn contains(&self, selector: &str) -> Result<bool> {
        let html = self.snapshot();
        Ok(select_first(&html, selector)?.is_some())
    }

    /// Event path for a click on the first element matching `selector`:
    /// the element itself followed by its ancestors up to `<html>`.
    pub fn click_path(&self, selector: &str) -> Result<Vec<Element>> {
        let html = self.snapshot();
        let target = select_first(&html, selector)?
            .ok_or_else(|| DomError::ElementNotFound(selector.to_string()))?;

        let mut path = vec![snapshot_element(target)];
        path.extend(
            target
                .ancestors()
                .filter_map(ElementRef::wrap)
                .map(snapshot_element),
        );
        Ok(path)
    }

    pub fn root_classes(&self) -> Vec<String> {
        self.state.lock().root_classes.clone()
    }

    pub fn has_root_class(&self, class: &str) -> bool {
        self.state.lock().root_classes.iter().any(|c| c == class)
    }

    pub fn scroll_top(&self) -> u32 {
        self.state.lock().scroll_top
    }

    /// Simulate the user scrolling the viewport
    pub fn scroll_to(&self, offset: u32) {
        self.state.lock().scroll_top = offset;
    }

    fn snapshot(&self) -> Html {
        Html::parse_document(&self.state.lock().markup)
    }
}

impl Document for MemoryDocument {
    fn title(&self) -> String {
        let html = self.snapshot();
        select_first(&html, "title")
            .ok()
            .flatten()
            .map(element_text)
            .unwrap_or_default()
    }

    fn replace_contents(&self, selector: &str, fragment: &str) -> Result<()> {
        let mut state = self.state.lock();
        let mut html = Html::parse_document(&state.markup);

        let container = select_first(&html, selector)?
            .map(|el| el.id())
            .ok_or_else(|| DomError::ContainerNotFound(selector.to_string()))?;

        if let Some(mut node) = html.tree.get_mut(container) {
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
        }

        // Copy the parsed fragment under the now-empty container.
        let parsed = Html::parse_fragment(fragment);
        let mut pending = vec![(container, *parsed.root_element())];
        while let Some((parent, source)) = pending.pop() {
            for child in source.children() {
                let Some(mut target) = html.tree.get_mut(parent) else {
                    break;
                };
                let appended = target.append(child.value().clone()).id();
                pending.push((appended, child));
            }
        }

        state.markup = html.html();
        tracing::trace!(selector, "Replaced container contents");
        Ok(())
    }

    fn take_element_value(&self, id: &str) -> Result<Option<String>> {
        let mut state = self.state.lock();
        let mut html = Html::parse_document(&state.markup);

        let selector = format!("[id=\"{}\"]", id.replace('"', "\\\""));
        let Some((node, value)) = select_first(&html, &selector)?.map(|el| {
            let value = el
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| el.text().collect::<String>());
            (el.id(), value.trim().to_string())
        }) else {
            return Ok(None);
        };

        if let Some(mut element) = html.tree.get_mut(node) {
            element.detach();
        }

        state.markup = html.html();
        Ok(Some(value))
    }

    fn root_data(&self, key: &str) -> Option<String> {
        self.state.lock().root_data.get(key).cloned()
    }

    fn set_root_data(&self, key: &str, value: &str) {
        self.state
            .lock()
            .root_data
            .insert(key.to_string(), value.to_string());
    }

    fn add_root_class(&self, class: &str) {
        let mut state = self.state.lock();
        if !state.root_classes.iter().any(|c| c == class) {
            state.root_classes.push(class.to_string());
        }
    }

    fn remove_root_class(&self, class: &str) {
        self.state.lock().root_classes.retain(|c| c != class);
    }

    fn scroll_to_top(&self) {
        self.state.lock().scroll_top = 0;
    }
}

fn select_first<'a>(html: &'a Html, selector: &str) -> Result<Option<ElementRef<'a>>> {
    let parsed = Selector::parse(selector)
        .map_err(|e| DomError::InvalidSelector(format!("{}: {}", selector, e)))?;
    Ok(html.select(&parsed).next())
}

fn snapshot_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    value
        .attrs()
        .fold(Element::new(value.name()), |element, (name, attr)| {
            element.with_attribute(name, attr)
        })
}

fn element_text(el: ElementRef<'_>) -> String {
    let text = el.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
