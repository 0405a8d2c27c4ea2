//! HTML rendering for the preview widget.

use crate::config::PreviewVariant;
use crate::view::{PreviewLine, PreviewView};

/// Render trigger and popover together.
pub fn render_preview(view: &PreviewView) -> String {
    format!(
        r#"<div class="cart-preview-root" data-state="{}" data-variant="{}">
{}
{}
</div>"#,
        view.state.as_str(),
        view.variant.as_str(),
        render_trigger(view),
        render_popover(view)
    )
}

/// Render the always-visible trigger for the configured variant.
pub fn render_trigger(view: &PreviewView) -> String {
    let expanded = if view.state.is_open() { "true" } else { "false" };
    match view.variant {
        PreviewVariant::Bubble => format!(
            r#"<button type="button" id="cart-preview" class="cart-preview-bubble" aria-label="Abrir vista previa del carrito" aria-controls="cart-popover" aria-expanded="{}">
    <i class="bi bi-bag-fill" aria-hidden="true"></i>
    <span class="cart-count-badge" id="cart-count">{}</span>
</button>"#,
            expanded, view.count
        ),
        PreviewVariant::Bar => format!(
            r#"<div id="cart-preview" class="cart-preview-bar show" role="button" tabindex="0" aria-label="Abrir vista previa del carrito" aria-controls="cart-popover" aria-expanded="{}" aria-hidden="false">
    <div class="bag" aria-hidden="true"><i class="bi bi-bag-check-fill"></i></div>
    <div class="summary"><span id="cart-count">{}</span> productos en el carrito</div>
</div>"#,
            expanded, view.count
        ),
        PreviewVariant::Badge => format!(
            r#"<a href="{}" id="cart-preview" class="cart-preview-badge" role="button" aria-label="Abrir vista previa del carrito" aria-controls="cart-popover" aria-expanded="{}">
    <i class="bi bi-cart3" aria-hidden="true"></i>
    <span class="badge rounded-pill bg-danger" id="cart-count">{}</span>
</a>"#,
            view.cta_url, expanded, view.count
        ),
    }
}

/// Render the popover shared by all variants.
pub fn render_popover(view: &PreviewView) -> String {
    let show = if view.state.is_open() { " show" } else { "" };
    format!(
        r#"<div id="cart-popover" class="cart-popover{}">
    <div class="cart-popover-header">
        <div class="title">Tu carrito</div>
        <div class="count-pill"><i class="bi bi-bag-fill"></i><span id="cart-popover-count">{}</span></div>
        <button type="button" class="btn btn-sm btn-light" id="cart-popover-close" aria-label="Cerrar"><i class="bi bi-x-lg"></i></button>
    </div>
    <div class="cart-popover-body" id="cart-popover-body">{}</div>
    <div class="cart-popover-footer">
        <div class="cart-summary"><span class="items" id="cart-popover-items">{}</span><span class="total" id="cart-popover-total">{}</span></div>
        <a class="btn btn-primary btn-cart" id="cart-popover-cta" href="{}" aria-disabled="{}">Ver carrito</a>
    </div>
</div>"#,
        show,
        view.count,
        render_popover_body(view),
        html_escape(&view.items_label),
        html_escape(&view.total_label),
        view.cta_url,
        view.cta_aria_disabled
    )
}

fn render_popover_body(view: &PreviewView) -> String {
    if view.is_empty() {
        return r#"<div class="cart-popover-empty">Tu carrito está vacío.</div>"#.to_string();
    }

    let mut html: String = view.lines.iter().map(render_line).collect();
    if view.hidden_lines > 0 {
        html.push_str(&format!(
            r#"<div class="text-center text-muted small mb-2">+{} más…</div>"#,
            view.hidden_lines
        ));
    }
    html
}

fn render_line(line: &PreviewLine) -> String {
    let name = html_escape(&line.name);
    format!(
        r#"<div class="cart-popover-item" data-id="{}">
    <img src="{}" alt="{}">
    <div class="info">
        <div class="name">{}</div>
        <div class="meta"><span class="price">{}</span></div>
    </div>
    <div class="actions">
        <div class="qty-controls" aria-label="Cantidad">
            <button class="btn-qty" data-action="dec" aria-label="Disminuir">-</button>
            <div class="qty">{}</div>
            <button class="btn-qty" data-action="inc" aria-label="Aumentar">+</button>
        </div>
        <button class="btn-remove" data-action="remove" aria-label="Quitar"><i class="bi bi-trash"></i></button>
    </div>
</div>"#,
        html_escape(line.product_id.as_str()),
        html_escape(&line.image_url),
        name,
        name,
        html_escape(&line.price_label),
        line.quantity
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
