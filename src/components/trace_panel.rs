use yew::prelude::*;

use crate::config::CELL_COUNT;
use crate::model::Trace;

#[derive(Properties, PartialEq, Clone)]
pub struct TracePanelProps {
    pub trace: Trace,
    pub selected: usize,
}

#[function_component]
pub fn TracePanel(props: &TracePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style = "text-align:right; font-variant-numeric:tabular-nums; font-weight:600; color:#00ffff;";
    let pattern = if props.trace.is_empty() {
        "—".to_string()
    } else {
        props
            .trace
            .as_slice()
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Pattern"}</span>
                <span style={value_style}>{ pattern }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Cells"}</span>
                <span style={value_style}>{ format!("{} / {}", props.selected, CELL_COUNT) }</span>
            </div>
        </div>
    }
}
