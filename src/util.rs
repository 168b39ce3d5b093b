// Canvas helpers shared by the components.

use web_sys::HtmlCanvasElement;

/// Converts client (viewport) coordinates to the canvas backing store's coordinates.
pub fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        to_canvas_axis(client_x, rect.left(), rect.width(), canvas.width() as f64),
        to_canvas_axis(client_y, rect.top(), rect.height(), canvas.height() as f64),
    )
}

/// The canvas may be scaled down by CSS, so offsets are stretched back to backing pixels.
fn to_canvas_axis(client: f64, origin: f64, css_extent: f64, canvas_extent: f64) -> f64 {
    let scale = if css_extent > 0.0 {
        canvas_extent / css_extent
    } else {
        1.0
    };
    (client - origin) * scale
}
