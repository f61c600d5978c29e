//! JS glue for the globe renderer and the host dashboard API.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = "
export function globe_point_of_view(globe) {
    return globe.pointOfView();
}

export function globe_fly_to(globe, lat, lng, altitude, transition_ms) {
    globe.pointOfView({ lat, lng, altitude }, transition_ms);
}

export function globe_set_auto_rotate(globe, enabled, speed) {
    const controls = globe.controls();
    controls.autoRotate = enabled;
    if (speed > 0) {
        controls.autoRotateSpeed = speed;
    }
}

export function host_find_worksheet(name) {
    if (typeof tableau === 'undefined' || !tableau.extensions || !tableau.extensions.dashboardContent) {
        return null;
    }
    const worksheets = tableau.extensions.dashboardContent.dashboard.worksheets;
    return worksheets.find(ws => ws.name === name) ?? null;
}

export function host_apply_filter(worksheet, field, value) {
    return worksheet.applyFilterAsync(field, [value], tableau.FilterUpdateType.REPLACE);
}

export function host_clear_filter(worksheet, field) {
    return worksheet.clearFilterAsync(field);
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub fn globe_point_of_view(globe: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn globe_fly_to(
        globe: &JsValue,
        lat: f64,
        lng: f64,
        altitude: f64,
        transition_ms: f64,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub fn globe_set_auto_rotate(globe: &JsValue, enabled: bool, speed: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub fn host_find_worksheet(name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn host_apply_filter(
        worksheet: &JsValue,
        field: &str,
        value: &str,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn host_clear_filter(worksheet: &JsValue, field: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Best-effort text for a thrown JS value.
pub fn js_error_text(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

pub fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}
