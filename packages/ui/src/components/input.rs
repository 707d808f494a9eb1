use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default = "".to_string())] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] id: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default)] required: bool,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "input {class}",
            r#type: "{r#type}",
            id: "{id}",
            placeholder: "{placeholder}",
            required,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// A `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] id: String,
    options: Vec<(String, String)>,
    value: String,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        select {
            class: "input {class}",
            id: "{id}",
            value: "{value}",
            onchange: move |evt| onchange.call(evt),
            for (choice, label) in options {
                option {
                    key: "{choice}",
                    value: "{choice}",
                    selected: choice == value,
                    "{label}"
                }
            }
        }
    }
}
