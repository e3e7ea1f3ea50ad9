use taskdeck_core::Filter;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:    Filter,
  pub counts:    Vec<(Filter, usize)>,
  pub on_select: Callback<Filter>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  html! {
      <div class="filter-buttons">
          {
              for props.counts.iter().copied().map(|(filter, count)| {
                  let on_select = props.on_select.clone();
                  let active = filter == props.active;
                  html! {
                      <button
                          class={classes!("filter-btn", active.then_some("active"))}
                          data-filter={filter.as_key()}
                          onclick={move |_| on_select.emit(filter)}
                      >
                          { filter.as_key() }
                          <span class="filter-count">{ count }</span>
                      </button>
                  }
              })
          }
      </div>
  }
}
