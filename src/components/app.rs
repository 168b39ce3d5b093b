use super::{pattern_view::PatternView, trace_panel::TracePanel};
use crate::config::GridConfig;
use crate::model::PatternGrid;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let grid = use_reducer(|| PatternGrid::new(GridConfig::load_or_default()));

    html! {
        <div style="min-height:100vh; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:16px; padding:16px; box-sizing:border-box; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <PatternView grid={grid.clone()} />
            <TracePanel trace={grid.trace().clone()} selected={grid.selected_count()} />
        </div>
    }
}
