//! HTML markup for the classic form editor.
//!
//! Every text and attribute value is escaped. Read-only dialogs get disabled
//! controls and no gallery buttons.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::context::{DialogContext, EditContext, WidgetParameter};
use crate::options::OptionList;
use crate::types::{ComplexKind, WidgetKind};
use crate::widget::Widget;

/// Message key of the gallery button label
pub const GALLERY_BUTTON_KEY: &str = "button.gallery";
/// Prefix of the per-field help message keys
pub const HELP_KEY_PREFIX: &str = "help.";

pub(crate) fn render(
    widget: &Widget,
    ctx: &EditContext<'_>,
    dialog: DialogContext,
    parameter: &dyn WidgetParameter,
) -> String {
    let id = attr(parameter.id()).into_owned();
    let value = parameter.string_value();
    let disabled = if dialog.read_only { " disabled" } else { "" };
    let mut out = String::new();

    match widget.kind() {
        WidgetKind::Checkbox => {
            let checked = if value == "true" { " checked" } else { "" };
            let _ = write!(
                out,
                r#"<input type="checkbox" name="{id}" id="{id}" value="true"{checked}{disabled}>"#
            );
        }
        WidgetKind::Select
        | WidgetKind::TypeFilter
        | WidgetKind::ElementViewSelect
        | WidgetKind::DisplayTypeSelect => {
            let options = widget.options(ctx);
            select(&mut out, &id, &options, options.selected(value), disabled);
        }
        WidgetKind::FilterSelect => {
            let options = widget.options(ctx);
            let _ = write!(
                out,
                r#"<div class="filter-select"><input type="search" id="{id}.filter"{disabled}>"#
            );
            select(&mut out, &id, &options, options.selected(value), disabled);
            out.push_str("</div>");
        }
        WidgetKind::RadioSelect => {
            let options = widget.options(ctx);
            let selected = options.selected(value);
            for option in &options {
                let checked = if option.value == selected { " checked" } else { "" };
                let _ = write!(
                    out,
                    r#"<label><input type="radio" name="{id}" value="{}"{checked}{disabled}> {}</label>"#,
                    attr(&option.value),
                    text(&option.label)
                );
            }
        }
        WidgetKind::ComboSelect => {
            // free text with suggestions
            let options = widget.options(ctx);
            let shown = if value.is_empty() {
                options.effective_default()
            } else {
                value
            };
            let _ = write!(
                out,
                r#"<input type="text" name="{id}" id="{id}" value="{}" list="{id}.options"{disabled}><datalist id="{id}.options">"#,
                attr(shown)
            );
            for option in &options {
                let _ = write!(
                    out,
                    r#"<option value="{}">{}</option>"#,
                    attr(&option.value),
                    text(&option.label)
                );
            }
            out.push_str("</datalist>");
        }
        WidgetKind::Html => {
            let _ = write!(
                out,
                r#"<textarea name="{id}" id="{id}" class="html"{disabled}>{}</textarea>"#,
                text(value)
            );
        }
        WidgetKind::Plaintext => {
            let _ = write!(
                out,
                r#"<input type="text" name="{id}" id="{id}" value="{}"{disabled}>"#,
                attr(value)
            );
        }
        WidgetKind::HttpUpload => {
            let _ = write!(out, r#"<input type="file" name="{id}" id="{id}"{disabled}>"#);
            if !value.is_empty() {
                let _ = write!(out, r#"<span class="current">{}</span>"#, text(value));
            }
        }
        WidgetKind::Gallery(_) | WidgetKind::AdeGallery(_) | WidgetKind::AdvancedGallery => {
            gallery(&mut out, widget, ctx, dialog, &id, value);
        }
        WidgetKind::SerialDate => {
            let _ = write!(
                out,
                r#"<input type="hidden" name="{id}" id="{id}" value="{v}"><input type="text" class="serial-date" id="{id}.display" value="{v}"{disabled}>"#,
                v = attr(value)
            );
        }
        WidgetKind::Complex(ComplexKind::DataView) => {
            let columns = widget
                .data_view()
                .map(|view| view.columns().join(","))
                .unwrap_or_default();
            let _ = write!(
                out,
                r#"<div class="data-view" id="{id}.view" data-columns="{}"><input type="hidden" name="{id}" value="{}"></div>"#,
                attr(&columns),
                attr(value)
            );
        }
        WidgetKind::Complex(ComplexKind::Default) => {
            let _ = write!(
                out,
                r#"<div class="complex" id="{id}.view"><input type="hidden" name="{id}" value="{}"></div>"#,
                attr(value)
            );
        }
    }

    if dialog.show_help {
        let key = format!("{HELP_KEY_PREFIX}{}", parameter.name());
        if let Some(help) = ctx.messages.key(&key) {
            let _ = write!(out, r#"<span class="help">{}</span>"#, text(&help));
        }
    }
    out
}

fn select(out: &mut String, id: &str, options: &OptionList, selected: &str, disabled: &str) {
    let _ = write!(out, r#"<select name="{id}" id="{id}"{disabled}>"#);
    for option in options {
        let marker = if option.value == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{marker}>{}</option>"#,
            attr(&option.value),
            text(&option.label)
        );
    }
    out.push_str("</select>");
}

fn gallery(
    out: &mut String,
    widget: &Widget,
    ctx: &EditContext<'_>,
    dialog: DialogContext,
    id: &str,
    value: &str,
) {
    let disabled = if dialog.read_only { " disabled" } else { "" };
    let gallery_type = widget.gallery_type().unwrap_or_default();
    let _ = write!(
        out,
        r#"<input type="text" name="{id}" id="{id}" value="{}" class="gallery" data-gallery-type="{gallery_type}"{disabled}>"#,
        attr(value)
    );
    if !dialog.read_only {
        let label = ctx.messages.key_or(GALLERY_BUTTON_KEY, "Open gallery");
        let _ = write!(
            out,
            r#"<button type="button" data-gallery="{id}">{}</button>"#,
            text(&label)
        );
    }
    if let Some(target) = widget.preview_target(value) {
        let _ = write!(
            out,
            r#"<span class="preview" data-resource="{}"></span>"#,
            attr(target)
        );
    }
}
