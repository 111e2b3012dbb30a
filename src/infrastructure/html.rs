// HTML rendering of the page model
use crate::domain::page::{CANVAS_MAX_HEIGHT_PX, Container, LOADING_TEXT, Node, Page};
use crate::domain::subject::LANDMARK_ATTRIBUTE;
use serde_json::Value;
use std::fmt::Write;

pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

const ERROR_HINT: &str = "Check the server logs for details";

/// Installs the unit callbacks and constructs every chart on the page
const BOOT_SCRIPT: &str = r#"document.querySelectorAll('script[data-chart-config]').forEach(function (node) {
  var cfg = JSON.parse(node.textContent);
  var canvas = document.getElementById(node.dataset.canvas);
  if (!canvas) { return; }
  var suffix = cfg.options.plugins.valueFormat.suffix;
  cfg.options.scales.y.ticks.callback = function (value) { return value + suffix; };
  cfg.options.plugins.tooltip.callbacks = {
    label: function (ctx) { return ctx.dataset.label + ': ' + ctx.parsed.y + suffix; }
  };
  new Chart(canvas.getContext('2d'), cfg);
});"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `.chart-placeholder` → `class="chart-placeholder"`, `#team` → `id="team"`
fn selector_attribute(selector: &str) -> String {
    if let Some(class) = selector.strip_prefix('.') {
        format!("class=\"{}\"", escape(class))
    } else if let Some(id) = selector.strip_prefix('#') {
        format!("id=\"{}\"", escape(id))
    } else {
        format!("data-selector=\"{}\"", escape(selector))
    }
}

pub fn render_error_panel(message: &str) -> String {
    format!(
        concat!(
            "<div class=\"chart-error\" role=\"alert\">",
            "<span class=\"material-icons\">error_outline</span>",
            "<p class=\"chart-error-title\">Unable to load performance chart</p>",
            "<p class=\"chart-error-message\">{}</p>",
            "<p class=\"chart-error-hint\">{}</p>",
            "</div>"
        ),
        escape(message),
        ERROR_HINT
    )
}

/// JSON safe to embed in a script element: no markup characters survive
fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Placeholder(text) => format!("<p>{}</p>", escape(text)),
        Node::Canvas { id, max_height_px } => match max_height_px {
            Some(px) => format!(
                "<canvas id=\"{}\" style=\"max-height: {}px\"></canvas>",
                escape(id),
                px
            ),
            None => format!("<canvas id=\"{}\"></canvas>", escape(id)),
        },
        Node::Loading => format!("<p class=\"chart-loading\">{}</p>", LOADING_TEXT),
        Node::ErrorPanel { message } => render_error_panel(message),
    }
}

/// Container markup plus the config of the chart bound to it, if any
pub fn render_container(page: &Page, container: &Container) -> String {
    let mut html = String::new();
    let style = if container.is_placeholder_styled() {
        ""
    } else {
        " style=\"background: transparent; padding: 0\""
    };

    let _ = write!(html, "<div {}{}>", selector_attribute(container.selector()), style);
    for node in container.nodes() {
        html.push_str(&render_node(node));
    }
    html.push_str("</div>");

    if let Some(instance) = page.instances().get(container.selector()) {
        let config = script_json(&instance.config);
        let _ = write!(
            html,
            concat!(
                "<script type=\"application/json\" data-chart-config data-canvas=\"{}\" ",
                "data-instance=\"{}\" data-rendered-at=\"{}\">{}</script>"
            ),
            escape(&instance.canvas_id),
            instance.id,
            instance.rendered_at.to_rfc3339(),
            config
        );
    }

    html
}

pub fn render_page(title: &str, page: &Page) -> String {
    let mut body = String::new();

    for (id, value) in page.hidden_inputs() {
        let _ = write!(
            body,
            "<input type=\"hidden\" id=\"{}\" value=\"{}\">",
            escape(id),
            escape(value)
        );
    }

    if page.has_legend() {
        let display = if page.is_legend_visible() { "block" } else { "none" };
        let _ = write!(body, "<div class=\"chart-legend\" style=\"display: {}\"></div>", display);
    }

    for container in page.containers() {
        body.push_str(&render_container(page, container));
    }

    let main_attributes = page
        .landmark()
        .and_then(|data| data.get(LANDMARK_ATTRIBUTE))
        .map(|id| format!(" data-{}=\"{}\"", LANDMARK_ATTRIBUTE, escape(id)))
        .unwrap_or_default();

    format!(
        concat!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<title>{title}</title>",
            "<style>canvas {{ max-height: {max}px; }} ",
            ".chart-error {{ text-align: center; color: #dc3545; padding: 40px; ",
            "background: #fff3cd; ",
            "border-radius: 8px; border: 1px solid #ffc107; }}</style>",
            "</head><body><main{main}><h1>{title}</h1>{body}</main>",
            "<script src=\"{cdn}\"></script><script>{boot}</script></body></html>"
        ),
        title = escape(title),
        max = CANVAS_MAX_HEIGHT_PX,
        main = main_attributes,
        body = body,
        cdn = CHART_JS_CDN,
        boot = BOOT_SCRIPT,
    )
}
