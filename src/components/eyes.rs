//! Mascot eyes that follow the pointer.
//! Renders the SVG face and wires the document/window listeners; every
//! movement decision lives in `state::PupilTracker`, this file only measures
//! geometry and writes transforms.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent, SvgElement, TouchEvent};
use yew::prelude::*;

use crate::model::{PUPIL_TRANSITION, Point};
use crate::state::{EyeAnchors, OffsetPair, PupilTracker};
use crate::util::cwarn;

fn socket_center(el: &Element) -> Point {
    let rect = el.get_bounding_client_rect();
    Point::new(
        rect.left() + rect.width() / 2.0,
        rect.top() + rect.height() / 2.0,
    )
}

fn attr_center(el: &Element) -> Option<Point> {
    let cx = el.get_attribute("cx")?.parse::<f64>().ok()?;
    let cy = el.get_attribute("cy")?.parse::<f64>().ok()?;
    Some(Point::new(cx, cy))
}

fn set_translate(el: &SvgElement, offset: Point) {
    let _ = el
        .style()
        .set_property("transform", &format!("translate({}px, {}px)", offset.x, offset.y));
}

fn apply_offsets(
    tracker: &PupilTracker,
    left_pupil: &NodeRef,
    right_pupil: &NodeRef,
    pair: OffsetPair,
) {
    let pair = tracker.sanitize(pair);
    // A pupil that vanished from the document is skipped, the other side
    // still updates.
    if let Some(el) = left_pupil.cast::<SvgElement>() {
        set_translate(&el, pair.left);
    }
    if let Some(el) = right_pupil.cast::<SvgElement>() {
        set_translate(&el, pair.right);
    }
}

#[function_component(Eyes)]
pub fn eyes() -> Html {
    let left_eye = use_node_ref();
    let right_eye = use_node_ref();
    let left_white = use_node_ref();
    let right_white = use_node_ref();
    let left_pupil = use_node_ref();
    let right_pupil = use_node_ref();
    let tracker = use_mut_ref(|| PupilTracker::new());

    {
        let left_eye = left_eye.clone();
        let right_eye = right_eye.clone();
        let left_white = left_white.clone();
        let right_white = right_white.clone();
        let left_pupil = left_pupil.clone();
        let right_pupil = right_pupil.clone();
        let tracker = tracker.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");

            // Capture the pupil's declared offset from its socket center and
            // re-center it, so all later positioning is a transform.
            let capture_rest = |white: &NodeRef, pupil: &NodeRef| -> Option<Point> {
                let white = white.cast::<Element>()?;
                let pupil = pupil.cast::<Element>()?;
                let white_c = attr_center(&white)?;
                let pupil_c = attr_center(&pupil)?;
                let _ = pupil.set_attribute("cx", &white_c.x.to_string());
                let _ = pupil.set_attribute("cy", &white_c.y.to_string());
                if let Ok(svg) = pupil.dyn_into::<SvgElement>() {
                    let _ = svg.style().set_property("transition", PUPIL_TRANSITION);
                }
                Some(Point::new(pupil_c.x - white_c.x, pupil_c.y - white_c.y))
            };

            let recompute_anchors = {
                let left_eye = left_eye.clone();
                let right_eye = right_eye.clone();
                let tracker = tracker.clone();
                move || {
                    let (Some(l), Some(r)) =
                        (left_eye.cast::<Element>(), right_eye.cast::<Element>())
                    else {
                        return;
                    };
                    tracker.borrow_mut().set_anchors(EyeAnchors {
                        left: socket_center(&l),
                        right: socket_center(&r),
                    });
                }
            };

            let sockets_present =
                left_eye.cast::<Element>().is_some() && right_eye.cast::<Element>().is_some();
            match (
                sockets_present,
                capture_rest(&left_white, &left_pupil),
                capture_rest(&right_white, &right_pupil),
            ) {
                (true, Some(left), Some(right)) => {
                    tracker.borrow_mut().set_rest(OffsetPair { left, right });
                    recompute_anchors();
                }
                _ => {
                    cwarn("eye elements missing from the document, pupil tracking disabled");
                    tracker.borrow_mut().mark_inert();
                }
            }

            // First paint: pupils sit at their captured rest offsets.
            let initial = tracker.borrow_mut().reset();
            if let Some(pair) = initial {
                apply_offsets(&tracker.borrow(), &left_pupil, &right_pupil, pair);
            }

            let track_to = {
                let tracker = tracker.clone();
                let left_pupil = left_pupil.clone();
                let right_pupil = right_pupil.clone();
                move |target: Point| {
                    let moved = tracker.borrow_mut().pointer_moved(target);
                    if let Some(pair) = moved {
                        apply_offsets(&tracker.borrow(), &left_pupil, &right_pupil, pair);
                    }
                }
            };
            let reset_pupils = {
                let tracker = tracker.clone();
                let left_pupil = left_pupil.clone();
                let right_pupil = right_pupil.clone();
                move || {
                    let rest = tracker.borrow_mut().reset();
                    if let Some(pair) = rest {
                        apply_offsets(&tracker.borrow(), &left_pupil, &right_pupil, pair);
                    }
                }
            };

            let mousemove_cb = {
                let track_to = track_to.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    track_to(Point::new(e.client_x() as f64, e.client_y() as f64));
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // touchstart and touchmove both resolve to the first touch point.
            let touch_track_cb = {
                let track_to = track_to.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if let Some(t0) = e.touches().item(0) {
                        track_to(Point::new(t0.client_x() as f64, t0.client_y() as f64));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_track_cb.as_ref().unchecked_ref(),
                )
                .ok();
            document
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_track_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let mouseleave_cb = {
                let reset_pupils = reset_pupils.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| reset_pupils()) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let reset_pupils = reset_pupils.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| reset_pupils()) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            // Resize and scroll invalidate the measured geometry, not the
            // displayed offsets.
            let geometry_cb = {
                let recompute_anchors = recompute_anchors.clone();
                Closure::wrap(
                    Box::new(move |_e: web_sys::Event| recompute_anchors()) as Box<dyn FnMut(_)>
                )
            };
            window
                .add_event_listener_with_callback("resize", geometry_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("scroll", geometry_cb.as_ref().unchecked_ref())
                .ok();

            move || {
                let _ = document.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchmove",
                    touch_track_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchstart",
                    touch_track_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    geometry_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "scroll",
                    geometry_cb.as_ref().unchecked_ref(),
                );
                tracker.borrow_mut().mark_inert();
                drop((
                    mousemove_cb,
                    touch_track_cb,
                    mouseleave_cb,
                    touch_end_cb,
                    geometry_cb,
                ));
            }
        });
    }

    html! {
        <div class="mascot">
            <svg viewBox="0 0 200 120" width="260" role="img" aria-label="A pair of eyes watching the pointer">
                <g ref={left_eye.clone()} id="left-eye">
                    <circle ref={left_white.clone()} id="left-white" class="eye-white" cx="70" cy="58" r="26" />
                    <circle ref={left_pupil.clone()} id="left-pupil" class="eye-pupil" cx="74" cy="64" r="9" />
                </g>
                <g ref={right_eye.clone()} id="right-eye">
                    <circle ref={right_white.clone()} id="right-white" class="eye-white" cx="130" cy="58" r="26" />
                    <circle ref={right_pupil.clone()} id="right-pupil" class="eye-pupil" cx="134" cy="64" r="9" />
                </g>
            </svg>
        </div>
    }
}
