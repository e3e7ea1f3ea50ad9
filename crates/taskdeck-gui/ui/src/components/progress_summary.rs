use taskdeck_core::Progress;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProgressSummaryProps {
  pub progress: Progress
}

#[function_component(ProgressSummary)]
pub fn progress_summary(
  props: &ProgressSummaryProps
) -> Html {
  let width = format!(
    "width:{}%;",
    props.progress.percent()
  );

  html! {
      <div class="progress">
          <div class="task-count">{ props.progress.summary() }</div>
          <div class="progress-track">
              <div class="progress-bar" style={width}></div>
          </div>
      </div>
  }
}
