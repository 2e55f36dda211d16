//! Accordion FAQ: at most one item expanded at a time.

use yew::prelude::*;

const FAQ_ITEMS: &[(&str, &str)] = &[
    (
        "Why do the eyes follow my cursor?",
        "Each pupil leans toward the pointer but is clamped to a ring around its \
         socket center, so it can look without ever escaping the eye.",
    ),
    (
        "What happens on touch screens?",
        "The first touch point drives the pupils exactly like the mouse does, and \
         lifting your finger lets them settle back to their resting pose.",
    ),
    (
        "Does the page track anything?",
        "No. The pointer position is consumed on the fly to place the pupils and is \
         never stored or sent anywhere.",
    ),
    (
        "Why did the colors just change?",
        "The page mirrors your system's light or dark preference and switches the \
         moment your system does.",
    ),
];

#[function_component(Faq)]
pub fn faq() -> Html {
    let open = use_state(|| None::<usize>);

    html! {
        <section class="faq">
            <h2>{"Frequently asked questions"}</h2>
            {
                for FAQ_ITEMS.iter().enumerate().map(|(i, (question, answer))| {
                    let is_open = *open == Some(i);
                    let onclick = {
                        let open = open.clone();
                        // Collapse everything, then expand the clicked item
                        // unless it was the one already open.
                        Callback::from(move |_| {
                            open.set(if *open == Some(i) { None } else { Some(i) });
                        })
                    };
                    html! {
                        <div class={classes!("faq-item", is_open.then_some("active"))}>
                            <button
                                class="faq-question"
                                aria-expanded={if is_open { "true" } else { "false" }}
                                {onclick}
                            >
                                { *question }
                            </button>
                            <div class="faq-answer" hidden={!is_open}>{ *answer }</div>
                        </div>
                    }
                })
            }
        </section>
    }
}
