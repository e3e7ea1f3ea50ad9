use taskdeck_core::render::TaskCard as Card;
use taskdeck_core::{
  DraftField,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::{
  EmptyState,
  TaskCard
};

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub cards:          Vec<Card>,
  pub empty_message:  String,
  pub on_toggle:      Callback<TaskId>,
  pub on_edit:        Callback<TaskId>,
  pub on_delete:      Callback<TaskId>,
  pub on_edit_change:
    Callback<(TaskId, DraftField)>,
  pub on_save:        Callback<TaskId>,
  pub on_cancel:      Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.cards.is_empty() {
    return html! {
        <div class="task-list">
            <EmptyState message={props.empty_message.clone()} />
        </div>
    };
  }

  html! {
      <div class="task-list">
          {
              for props.cards.iter().map(|card| html! {
                  <TaskCard
                      key={card.id.to_string()}
                      card={card.clone()}
                      on_toggle={props.on_toggle.clone()}
                      on_edit={props.on_edit.clone()}
                      on_delete={props.on_delete.clone()}
                      on_edit_change={props.on_edit_change.clone()}
                      on_save={props.on_save.clone()}
                      on_cancel={props.on_cancel.clone()}
                  />
              })
          }
      </div>
  }
}
