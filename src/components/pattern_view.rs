use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::model::{PatternGrid, TouchInput};
use crate::render::render_pattern;
use crate::state::{TouchAction, TouchState};
use crate::util::canvas_point;

const BACKGROUND: &str = "#0e1116";

#[derive(Properties, PartialEq, Clone)]
pub struct PatternViewProps {
    pub grid: UseReducerHandle<PatternGrid>,
}

#[function_component(PatternView)]
pub fn pattern_view(props: &PatternViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let grid_ref = use_mut_ref(|| props.grid.clone());
    let touch_state = use_mut_ref(TouchState::default);

    // Every handled event bumps the version; keep the latest handle and redraw.
    {
        let grid_ref = grid_ref.clone();
        let current = props.grid.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.grid.version, move |_| {
            *grid_ref.borrow_mut() = current;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let grid_ref = grid_ref.clone();
        let touch_state = touch_state.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let draw: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let grid_ref = grid_ref.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let Some(mut ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        log::warn!("canvas has no 2d context");
                        return;
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    ctx.set_fill_style_str(BACKGROUND);
                    ctx.fill_rect(0.0, 0.0, w, h);
                    let grid = grid_ref.borrow().clone();
                    render_pattern(&grid, &mut ctx);
                })
            };
            *draw_ref.borrow_mut() = Some(draw.clone());
            draw();

            // Shared by every listener once the event has passed the pointer filter.
            let dispatch: Rc<dyn Fn(&web_sys::Event, TouchAction, f64, f64)> = {
                let canvas = canvas.clone();
                let grid_ref = grid_ref.clone();
                Rc::new(move |e: &web_sys::Event, action: TouchAction, client_x: f64, client_y: f64| {
                    let (x, y) = canvas_point(&canvas, client_x, client_y);
                    log::trace!("{:?} at ({:.1}, {:.1})", action, x, y);
                    let handle = grid_ref.borrow().clone();
                    handle.dispatch(TouchInput { action, x, y });
                    if action.consumed() {
                        e.prevent_default();
                    }
                })
            };

            let mouse_cb = {
                let dispatch = dispatch.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let event: &web_sys::Event = &e;
                    let raw = TouchAction::from_event_type(&e.type_());
                    let accepted = touch_state
                        .borrow_mut()
                        .accept_mouse(raw, e.button(), e.buttons());
                    if let Some(action) = accepted {
                        dispatch(event, action, e.client_x() as f64, e.client_y() as f64);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            for kind in ["mousedown", "mousemove", "mouseleave"] {
                canvas
                    .add_event_listener_with_callback(kind, mouse_cb.as_ref().unchecked_ref())
                    .ok();
            }
            // release can happen outside the canvas
            window
                .add_event_listener_with_callback("mouseup", mouse_cb.as_ref().unchecked_ref())
                .ok();

            let touch_cb = {
                let dispatch = dispatch.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let event: &web_sys::Event = &e;
                    let tracked = touch_state.borrow().touch_id;
                    let changed = e.changed_touches();
                    let touch = (0..changed.length())
                        .filter_map(|i| changed.item(i))
                        .find(|t| tracked.is_none_or(|id| t.identifier() == id));
                    let Some(t) = touch else {
                        e.prevent_default();
                        return;
                    };
                    let raw = TouchAction::from_event_type(&e.type_());
                    let accepted = touch_state.borrow_mut().accept(raw, Some(t.identifier()));
                    if let Some(action) = accepted {
                        dispatch(event, action, t.client_x() as f64, t.client_y() as f64);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
                canvas
                    .add_event_listener_with_callback(kind, touch_cb.as_ref().unchecked_ref())
                    .ok();
            }

            // Losing focus mid-drag swallows the release; end the gesture here instead.
            let blur_cb = {
                let dispatch = dispatch.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    let tracked = touch_state.borrow().touch_id;
                    let accepted = touch_state.borrow_mut().accept(TouchAction::Up, tracked);
                    if let Some(action) = accepted {
                        // release ignores the position
                        dispatch(&e, action, 0.0, 0.0);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("blur", blur_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            move || {
                for kind in ["mousedown", "mousemove", "mouseleave"] {
                    let _ = canvas
                        .remove_event_listener_with_callback(kind, mouse_cb.as_ref().unchecked_ref());
                }
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    mouse_cb.as_ref().unchecked_ref(),
                );
                let _ = window
                    .remove_event_listener_with_callback("blur", blur_cb.as_ref().unchecked_ref());
                for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
                    let _ = canvas
                        .remove_event_listener_with_callback(kind, touch_cb.as_ref().unchecked_ref());
                }
                *draw_ref.borrow_mut() = None;
            }
        });
    }

    let extent = props.grid.config().canvas_extent().ceil() as u32;
    html! {
        <canvas
            ref={canvas_ref}
            width={extent.to_string()}
            height={extent.to_string()}
            style="display:block; max-width:100%; max-height:80vh; aspect-ratio:1; touch-action:none; background:#0e1116; border:1px solid #30363d; border-radius:12px;"
        />
    }
}
