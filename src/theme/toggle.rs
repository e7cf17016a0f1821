use yew::prelude::*;

use crate::theme::{Theme, ThemeController, ToggleFace, TOGGLE_BUTTON_ID};

#[derive(Properties, Clone)]
pub struct ThemeToggleProps {
    pub controller: ThemeController,
}

impl PartialEq for ThemeToggleProps {
    fn eq(&self, other: &Self) -> bool {
        self.controller.ptr_eq(&other.controller)
    }
}

/// Floating theme button, rendered only when the page does not ship one.
#[function_component(ThemeToggle)]
pub fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let theme = use_state(|| props.controller.current());

    // Follow changes made through `window.themeToggle`.
    {
        let theme = theme.clone();
        let controller = props.controller.clone();
        use_effect_with((), move |_| {
            let id = controller.subscribe(Callback::from(move |t: Theme| theme.set(t)));
            move || controller.unsubscribe(id)
        });
    }

    let onclick = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.toggle();
        })
    };

    let face = ToggleFace::for_theme(*theme);

    html! {
        <button
            id={TOGGLE_BUTTON_ID}
            class="theme-toggle"
            aria-label="Toggle Theme"
            title={face.title}
            {onclick}
        >
            { face.icon }
        </button>
    }
}
