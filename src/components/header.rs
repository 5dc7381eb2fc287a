use crate::model::DatasetKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub dataset: DatasetKind,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <>
            <h1 id="title">{"TOP 100"}</h1>
            <p id="description">{ props.dataset.description() }</p>
        </>
    }
}
