use crate::model::DatasetKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DatasetNavProps {
    pub selected: DatasetKind,
    pub on_select: Callback<DatasetKind>,
}

#[function_component]
pub fn DatasetNav(props: &DatasetNavProps) -> Html {
    html! {
        <nav>
            { for DatasetKind::ALL.iter().map(|&kind| {
                let cb = props.on_select.clone();
                let onclick = Callback::from(move |_: MouseEvent| cb.emit(kind));
                let pressed = if kind == props.selected { "true" } else { "false" };
                html! {
                    <button key={kind.key()} onclick={onclick} aria-pressed={pressed}>
                        { kind.label() }
                    </button>
                }
            }) }
        </nav>
    }
}
