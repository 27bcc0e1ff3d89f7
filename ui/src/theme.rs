use dioxus::{document::eval, prelude::*};
use types::Theme;

#[derive(Clone, Copy)]
pub struct ThemeContext(Signal<Theme>);

impl ThemeContext {
    pub fn get(&self) -> Theme {
        *self.0.read()
    }

    pub fn toggle(&mut self) {
        let next = self.get().toggled();
        api::set_theme(next);
        self.0.set(next);
    }
}

/// Load the saved theme and keep the document's `dark` class in step with it.
pub fn provide_theme() -> ThemeContext {
    let theme = use_context_provider(|| ThemeContext(Signal::new(api::theme())));

    use_effect(move || {
        let dark = theme.get() == Theme::Dark;
        eval(&format!(
            "document.documentElement.classList.toggle('dark', {dark});"
        ));
    });

    theme
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_theme();
    let label = match theme.get() {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    rsx! {
        button {
            class: "btn btn-secondary theme-toggle",
            onclick: move |_| theme.toggle(),
            "{label}"
        }
    }
}
