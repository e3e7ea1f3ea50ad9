use taskdeck_core::SortKey;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SortSelectProps {
  pub active:    SortKey,
  pub on_change: Callback<SortKey>
}

#[function_component(SortSelect)]
pub fn sort_select(
  props: &SortSelectProps
) -> Html {
  let on_change = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        if let Some(sort) =
          SortKey::from_key(&select.value())
        {
          on_change.emit(sort);
        }
      }
    )
  };

  html! {
      <label class="sort-select">
          { "Sort by " }
          <select
              class="form-input"
              value={props.active.as_key()}
              onchange={on_change}
          >
              {
                  for SortKey::ALL.into_iter().map(|sort| html! {
                      <option value={sort.as_key()} selected={sort == props.active}>
                          { sort.label() }
                      </option>
                  })
              }
          </select>
      </label>
  }
}
