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
pub struct TaskEditFormProps {
  pub draft:     TaskDraft,
  pub on_change: Callback<DraftField>,
  pub on_save:   Callback<()>,
  pub on_cancel: Callback<()>
}

#[function_component(TaskEditForm)]
pub fn task_edit_form(
  props: &TaskEditFormProps
) -> Html {
  let on_save = props.on_save.clone();
  let on_cancel =
    props.on_cancel.clone();

  html! {
      <div class="task-edit">
          <TaskFields
              draft={props.draft.clone()}
              on_change={props.on_change.clone()}
              on_enter={Some(props.on_save.clone())}
          />
          <div class="task-actions">
              <button class="btn btn-primary" onclick={move |_| on_save.emit(())}>{ "Save" }</button>
              <button class="btn" onclick={move |_| on_cancel.emit(())}>{ "Cancel" }</button>
          </div>
      </div>
  }
}
