use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::{ChartSurface, LegendEntry, TileView};
use crate::config::{ChartConfig, LegendConfig};
use crate::error::RenderError;
use crate::state::TooltipState;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
const TOOLTIP_ID: &str = "tooltip";

const TOOLTIP_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("visibility", "hidden"),
    ("background-color", "#222831"),
    ("border-radius", "5px"),
    ("padding", "5px 10px"),
    ("font-size", "10px"),
    ("color", "#EEEEEE"),
    ("z-index", "10"),
    ("max-width", "200px"),
    ("max-height", "150px"),
    ("overflow", "auto"),
];
const LABEL_BOX_STYLE: &str =
    "font-size: 10px; color: white; word-wrap: break-word; white-space: normal; padding: 1px;";
const LABEL_STYLE: &str = "width:100%; height:100%; overflow:hidden; text-align:center; white-space:normal; word-wrap:break-word;";

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

struct Tooltip {
    el: HtmlElement,
    state: TooltipState,
    offset: f64,
}

impl Tooltip {
    fn apply(&self) -> Result<(), RenderError> {
        let style = self.el.style();
        style.set_property("visibility", self.state.visibility())?;
        if !self.state.visible {
            return Ok(());
        }
        self.el.set_attribute("data-name", &self.state.name)?;
        self.el.set_attribute("data-category", &self.state.category)?;
        self.el.set_attribute("data-value", &self.state.value)?;
        self.el.set_inner_html(&self.state.inner_html());
        style.set_property("left", &format!("{}px", self.state.left))?;
        style.set_property("top", &format!("{}px", self.state.top))?;
        Ok(())
    }
}

/// Draws scenes straight into the DOM: tiles into the chart svg, entries into
/// the legend svg, and one tooltip div appended to `body`.
pub struct SvgSurface {
    document: Document,
    chart: Element,
    legend: Element,
    legend_config: LegendConfig,
    tooltip: Rc<RefCell<Tooltip>>,
    // Hover closures for the current tiles; dropped with them on clear.
    handlers: Vec<MouseHandler>,
}

impl SvgSurface {
    pub fn attach(chart: Element, legend: Element, config: &ChartConfig) -> Result<Self, RenderError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(RenderError::MissingElement("document"))?;
        let body = document.body().ok_or(RenderError::MissingElement("body"))?;

        if let Some(stale) = document.get_element_by_id(TOOLTIP_ID) {
            stale.remove();
        }
        let el = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| RenderError::Dom("tooltip is not an HTML element".into()))?;
        el.set_id(TOOLTIP_ID);
        let style = el.style();
        for (prop, value) in TOOLTIP_STYLE {
            style.set_property(prop, value)?;
        }
        body.append_child(&el)?;

        Ok(Self {
            document,
            chart,
            legend,
            legend_config: config.legend.clone(),
            tooltip: Rc::new(RefCell::new(Tooltip {
                el,
                state: TooltipState::default(),
                offset: config.tooltip_offset,
            })),
            handlers: Vec::new(),
        })
    }

    fn svg(&self, tag: &str) -> Result<Element, RenderError> {
        Ok(self.document.create_element_ns(Some(SVG_NS), tag)?)
    }

    fn label(&self, tile: &TileView) -> Result<Element, RenderError> {
        let object = self.svg("foreignObject")?;
        object.set_attribute("x", "0")?;
        object.set_attribute("y", "0")?;
        object.set_attribute("width", &tile.width.to_string())?;
        object.set_attribute("height", &tile.height.to_string())?;
        object.set_attribute("style", LABEL_BOX_STYLE)?;

        let wrapper = self.document.create_element_ns(Some(XHTML_NS), "div")?;
        wrapper.set_attribute("style", LABEL_STYLE)?;
        let text = self.document.create_element_ns(Some(XHTML_NS), "div")?;
        text.set_text_content(Some(&tile.name));
        wrapper.append_child(&text)?;
        object.append_child(&wrapper)?;
        Ok(object)
    }

    /// Hover on the group covers both the rect and its label.
    fn listen(&mut self, target: &Element, tile: &TileView) -> Result<(), RenderError> {
        let enter = {
            let tooltip = self.tooltip.clone();
            let tile = tile.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let mut t = tooltip.borrow_mut();
                let offset = t.offset;
                t.state.show(&tile, e.page_x() as f64, e.page_y() as f64, offset);
                if let Err(err) = t.apply() {
                    log::warn!("tooltip update failed: {}", err);
                }
            }) as Box<dyn FnMut(_)>)
        };
        let leave = {
            let tooltip = self.tooltip.clone();
            Closure::wrap(Box::new(move |_e: MouseEvent| {
                let mut t = tooltip.borrow_mut();
                t.state.hide();
                if let Err(err) = t.apply() {
                    log::warn!("tooltip update failed: {}", err);
                }
            }) as Box<dyn FnMut(_)>)
        };
        target.add_event_listener_with_callback("mouseover", enter.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("mouseout", leave.as_ref().unchecked_ref())?;
        self.handlers.push(enter);
        self.handlers.push(leave);
        Ok(())
    }
}

fn remove_children(el: &Element) -> Result<(), RenderError> {
    while let Some(child) = el.first_child() {
        el.remove_child(&child)?;
    }
    Ok(())
}

impl ChartSurface for SvgSurface {
    fn clear(&mut self) -> Result<(), RenderError> {
        remove_children(&self.chart)?;
        remove_children(&self.legend)?;
        self.handlers.clear();
        let mut t = self.tooltip.borrow_mut();
        t.state.hide();
        t.apply()
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
        self.chart.set_attribute("width", &width.to_string())?;
        self.chart.set_attribute("height", &height.to_string())?;
        Ok(())
    }

    fn add_tile(&mut self, tile: &TileView) -> Result<(), RenderError> {
        let group = self.svg("g")?;
        group.set_attribute("transform", &format!("translate({},{})", tile.x, tile.y))?;
        group.set_attribute("data-id", &tile.id)?;

        let rect = self.svg("rect")?;
        rect.set_attribute("class", "tile")?;
        rect.set_attribute("width", &tile.width.to_string())?;
        rect.set_attribute("height", &tile.height.to_string())?;
        rect.set_attribute("fill", tile.fill)?;
        rect.set_attribute("data-name", &tile.name)?;
        rect.set_attribute("data-category", &tile.category)?;
        rect.set_attribute("data-value", &tile.value)?;
        group.append_child(&rect)?;
        let label = self.label(tile)?;
        group.append_child(&label)?;

        self.listen(&group, tile)?;
        self.chart.append_child(&group)?;
        Ok(())
    }

    fn set_legend(&mut self, entries: &[LegendEntry]) -> Result<(), RenderError> {
        let cfg = &self.legend_config;
        remove_children(&self.legend)?;
        self.legend.set_attribute("width", &cfg.width.to_string())?;
        self.legend.set_attribute(
            "height",
            &(entries.len() as f64 * cfg.row_height).to_string(),
        )?;
        for (i, entry) in entries.iter().enumerate() {
            let item = self.svg("g")?;
            item.set_attribute(
                "transform",
                &format!("translate(0, {})", i as f64 * cfg.row_spacing),
            )?;

            let swatch = self.svg("rect")?;
            swatch.set_attribute("class", "legend-item")?;
            swatch.set_attribute("x", "0")?;
            swatch.set_attribute("width", &cfg.swatch_size.to_string())?;
            swatch.set_attribute("height", &cfg.swatch_size.to_string())?;
            swatch.set_attribute("fill", entry.color)?;
            item.append_child(&swatch)?;

            let text = self.svg("text")?;
            text.set_attribute("x", &cfg.text_x.to_string())?;
            text.set_attribute("y", &cfg.text_y.to_string())?;
            text.set_attribute("text-anchor", "start")?;
            text.set_attribute("style", "font-size: 14px")?;
            text.set_text_content(Some(entry.category));
            item.append_child(&text)?;

            self.legend.append_child(&item)?;
        }
        Ok(())
    }
}

impl Drop for SvgSurface {
    fn drop(&mut self) {
        let _ = remove_children(&self.chart);
        let _ = remove_children(&self.legend);
        self.tooltip.borrow().el.remove();
    }
}
