use taskdeck_core::render::TaskCard as Card;
use taskdeck_core::{
  DraftField,
  TaskId
};
use yew::{
  Callback,
  Classes,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::TaskEditForm;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub card:           Card,
  pub on_toggle:      Callback<TaskId>,
  pub on_edit:        Callback<TaskId>,
  pub on_delete:      Callback<TaskId>,
  pub on_edit_change:
    Callback<(TaskId, DraftField)>,
  pub on_save:        Callback<TaskId>,
  pub on_cancel:      Callback<TaskId>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let card = &props.card;
  let id = card.id;
  let style = format!(
    "border-left-color:{};",
    card.accent_color
  );

  if let Some(draft) = card.editing.clone()
  {
    let on_change = {
      let on_edit_change =
        props.on_edit_change.clone();
      Callback::from(
        move |field: DraftField| {
          on_edit_change.emit((id, field));
        }
      )
    };
    let on_save = props
      .on_save
      .reform(move |_: ()| id);
    let on_cancel = props
      .on_cancel
      .reform(move |_: ()| id);

    return html! {
        <div class="task-item editing" style={style}>
            <TaskEditForm
                draft={draft}
                on_change={on_change}
                on_save={on_save}
                on_cancel={on_cancel}
            />
        </div>
    };
  }

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    move |_: web_sys::MouseEvent| {
      on_toggle.emit(id)
    }
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    move |_: web_sys::MouseEvent| {
      on_edit.emit(id)
    }
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    move |_: web_sys::MouseEvent| {
      on_delete.emit(id)
    }
  };

  html! {
      <div
          class={struck("task-item", card.completed)}
          style={style}
          data-id={id.to_string()}
      >
          <div class="task-header">
              <div class={struck("task-title", card.completed)}>
                  { card.title.clone() }
              </div>
              <div class="task-actions">
                  <button class="btn" onclick={on_toggle}>
                      { if card.completed { "Undo" } else { "Done" } }
                  </button>
                  <button class="btn" onclick={on_edit}>{ "Edit" }</button>
                  <button class="btn btn-danger" onclick={on_delete}>{ "Delete" }</button>
              </div>
          </div>
          {
              if let Some(description) = card.description.clone() {
                  html! {
                      <div class={struck("task-description", card.completed)}>
                          { description }
                      </div>
                  }
              } else {
                  html! {}
              }
          }
          <div class="task-meta">
              <span class="category-badge">{ card.category.as_key() }</span>
              <span class="priority-badge">{ card.priority.as_key() }</span>
              {
                  if let Some(due) = card.due.clone() {
                      html! {
                          <span class={classes!("due-date", due.status.is_overdue().then_some("overdue"))}>
                              { due.label }
                          </span>
                      }
                  } else {
                      html! {}
                  }
              }
          </div>
      </div>
  }
}

/// Completed tasks strike through every
/// text block that carries this class.
fn struck(
  base: &'static str,
  completed: bool
) -> Classes {
  classes!(base, completed.then_some("completed"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn completed_title_and_description_are_struck()
  {
    for base in
      ["task-title", "task-description"]
    {
      let done = struck(base, true);
      assert!(done.contains(base));
      assert!(done.contains("completed"));

      let open = struck(base, false);
      assert!(open.contains(base));
      assert!(!open.contains("completed"));
    }
  }
}
