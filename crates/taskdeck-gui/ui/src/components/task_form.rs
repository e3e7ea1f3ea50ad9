use taskdeck_core::{
  DraftField,
  TaskDraft
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskFields;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub draft:     TaskDraft,
  pub on_change: Callback<DraftField>,
  pub on_submit: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let on_submit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };

  html! {
      <form class="task-form" onsubmit={on_submit}>
          <TaskFields
              draft={props.draft.clone()}
              on_change={props.on_change.clone()}
              on_enter={Some(props.on_submit.clone())}
          />
          <button class="btn btn-primary" type="submit">{ "Add Task" }</button>
      </form>
  }
}
