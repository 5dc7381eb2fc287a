use web_sys::Element;
use yew::prelude::*;

use super::{dataset_nav::DatasetNav, header::Header};
use crate::config::ChartConfig;
use crate::error::RenderError;
use crate::loader;
use crate::model::{ChartAction, ChartState, DatasetKind, LoadStatus};
use crate::render::{self, Scene, svg::SvgSurface};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ChartConfig::from_document());
    let state = use_reducer({
        let selected = config.default_dataset;
        move || ChartState::new(selected)
    });
    let chart_ref = use_node_ref();
    let legend_ref = use_node_ref();
    let surface = use_mut_ref(|| None::<SvgSurface>);

    // Fetch all datasets once
    {
        let state = state.clone();
        let sources = config.sources.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match loader::load_all(&sources).await {
                    Ok(datasets) => state.dispatch(ChartAction::Loaded(datasets)),
                    Err(e) => {
                        log::error!("Error fetching data: {}", e);
                        state.dispatch(ChartAction::LoadFailed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Redraw whenever the data or the selection changes
    {
        let state = state.clone();
        let config = config.clone();
        let surface = surface.clone();
        let chart_ref = chart_ref.clone();
        let legend_ref = legend_ref.clone();
        use_effect_with(state.revision, move |_| {
            if let Some(tree) = state.active_tree() {
                let scene = render::build_scene(tree, state.selected, &config);
                let mut slot = surface.borrow_mut();
                if let Err(e) = redraw(&mut slot, &chart_ref, &legend_ref, &config, &scene) {
                    log::error!("treemap draw failed: {}", e);
                }
            }
            || ()
        });
    }

    // Tooltip lives outside the component tree; take it down with us.
    {
        let surface = surface.clone();
        use_effect_with((), move |_| {
            move || {
                surface.borrow_mut().take();
            }
        });
    }

    let on_select = {
        let state = state.clone();
        Callback::from(move |kind: DatasetKind| {
            log::debug!("dataset selected: {}", kind.key());
            state.dispatch(ChartAction::Select(kind));
        })
    };

    let busy = if state.status == LoadStatus::Loading { "true" } else { "false" };

    html! {
        <div>
            <Header dataset={state.selected} />
            <DatasetNav selected={state.selected} on_select={on_select} />
            <div style="display:flex; align-items:flex-start;" aria-busy={busy}>
                <svg ref={chart_ref} id="treemap"></svg>
                <svg ref={legend_ref} id="legend"></svg>
            </div>
        </div>
    }
}

fn redraw(
    slot: &mut Option<SvgSurface>,
    chart_ref: &NodeRef,
    legend_ref: &NodeRef,
    config: &ChartConfig,
    scene: &Scene,
) -> Result<(), RenderError> {
    if slot.is_none() {
        let chart = chart_ref
            .cast::<Element>()
            .ok_or(RenderError::MissingElement("svg#treemap"))?;
        let legend = legend_ref
            .cast::<Element>()
            .ok_or(RenderError::MissingElement("svg#legend"))?;
        *slot = Some(SvgSurface::attach(chart, legend, config)?);
    }
    match slot.as_mut() {
        Some(surface) => render::draw(surface, scene),
        None => Ok(()),
    }
}
