//! Plain-text output: notifications as they fire and widget snapshots.

use async_trait::async_trait;
use typeahead::{HandlerError, TypeaheadHandlers, TypeaheadView};

/// Prints every notification to stdout.
#[derive(Debug, Default)]
pub struct PrintHandlers;

#[async_trait]
impl TypeaheadHandlers<String> for PrintHandlers {
    async fn on_value_changed(&self, value: Option<String>) -> Result<(), HandlerError> {
        match value {
            Some(value) => println!("~ value changed: {value}"),
            None => println!("~ value cleared"),
        }
        Ok(())
    }

    async fn on_text_changed(&self, text: String) -> Result<(), HandlerError> {
        println!("~ text changed: {text:?}");
        Ok(())
    }

    async fn on_search_changed(&self, search: String) -> Result<(), HandlerError> {
        println!("~ search changed: {search:?}");
        Ok(())
    }

    async fn on_not_found(&self, search: String) -> Result<(), HandlerError> {
        println!("~ not found: {search:?}");
        Ok(())
    }
}

/// Render a snapshot as a few lines of text.
pub fn render(view: &TypeaheadView) -> String {
    let mut out = String::new();

    let text = if view.text.is_empty() {
        view.placeholder
            .as_deref()
            .map(|placeholder| format!("({placeholder})"))
            .unwrap_or_default()
    } else {
        format!("{:?}", view.text)
    };
    let indicator = if view.is_open() { "▲" } else { "▼" };
    out.push_str(&format!("[{text}] {indicator}"));
    if view.disabled {
        out.push_str(" (disabled)");
    }

    for row in &view.rows {
        let marker = if row.active { ">" } else { " " };
        out.push_str(&format!("\n  {marker} {:>2} {}", row.index, row.text));
    }
    if let Some(not_found) = &view.not_found {
        out.push_str(&format!("\n    {not_found}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeahead::RowView;

    fn view() -> TypeaheadView {
        TypeaheadView {
            id: "__typeahead_0".into(),
            text: "a".into(),
            placeholder: Some("Fruit".into()),
            disabled: false,
            dropdown_visible: true,
            can_search: true,
            rows: vec![
                RowView {
                    index: 0,
                    text: "Apple".into(),
                    active: true,
                },
                RowView {
                    index: 1,
                    text: "Avocado".into(),
                    active: false,
                },
            ],
            not_found: None,
        }
    }

    #[test]
    fn test_render_open_dropdown() {
        assert_eq!(
            render(&view()),
            "[\"a\"] ▲\n  >  0 Apple\n     1 Avocado"
        );
    }

    #[test]
    fn test_render_placeholder_and_not_found() {
        let view = TypeaheadView {
            text: String::new(),
            rows: Vec::new(),
            not_found: Some("Nothing here".into()),
            ..view()
        };
        assert_eq!(render(&view), "[(Fruit)] ▼\n    Nothing here");
    }
}
