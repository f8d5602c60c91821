//! Reusable labeled form inputs.

use dioxus::prelude::*;

/// A labeled single-line input.
#[component]
pub fn TextInput(
    label: &'static str,
    value: String,
    on_change: EventHandler<String>,
    #[props(default = "text")] input_type: &'static str,
    #[props(default = "")] placeholder: &'static str,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                class: "input",
                r#type: input_type,
                placeholder: placeholder,
                disabled: disabled,
                value: "{value}",
                oninput: move |e| on_change.call(e.value()),
            }
        }
    }
}

/// A labeled multi-line input.
#[component]
pub fn TextAreaInput(
    label: &'static str,
    value: String,
    on_change: EventHandler<String>,
    #[props(default = 4)] rows: u32,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            textarea {
                rows: "{rows}",
                value: "{value}",
                oninput: move |e| on_change.call(e.value()),
            }
        }
    }
}

/// A labeled select over `(value, label)` pairs.
#[component]
pub fn SelectInput(
    label: &'static str,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
    /// Shown first with an empty value when set
    #[props(default)]
    placeholder: Option<&'static str>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            select {
                value: "{value}",
                onchange: move |e| on_change.call(e.value()),
                if let Some(placeholder) = placeholder {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for (opt_value, opt_label) in options.iter() {
                    option {
                        key: "{opt_value}",
                        value: "{opt_value}",
                        selected: *opt_value == value,
                        "{opt_label}"
                    }
                }
            }
        }
    }
}
