use taskdeck_core::datetime::{
  format_input_date,
  parse_input_date
};
use taskdeck_core::{
  Category,
  DraftField,
  Priority,
  TaskDraft
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

/// The five editable task fields. Shared
/// by the add form and the inline editor.
#[derive(Properties, PartialEq)]
pub struct TaskFieldsProps {
  pub draft:     TaskDraft,
  pub on_change: Callback<DraftField>,
  #[prop_or_default]
  pub on_enter:  Option<Callback<()>>
}

#[function_component(TaskFields)]
pub fn task_fields(
  props: &TaskFieldsProps
) -> Html {
  let draft = &props.draft;

  let on_title = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(
          DraftField::Title(input.value())
        );
      }
    )
  };

  let on_title_key = {
    let on_enter = props.on_enter.clone();
    Callback::from(
      move |e: web_sys::KeyboardEvent| {
        if e.key() != "Enter" {
          return;
        }
        if let Some(on_enter) = &on_enter {
          e.prevent_default();
          on_enter.emit(());
        }
      }
    )
  };

  let on_description = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        on_change.emit(
          DraftField::Description(
            input.value()
          )
        );
      }
    )
  };

  let on_category = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        if let Some(category) =
          Category::from_key(&select.value())
        {
          on_change.emit(
            DraftField::Category(category)
          );
        }
      }
    )
  };

  let on_priority = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        if let Some(priority) =
          Priority::from_key(&select.value())
        {
          on_change.emit(
            DraftField::Priority(priority)
          );
        }
      }
    )
  };

  let on_due = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_change.emit(DraftField::DueDate(
          parse_input_date(&input.value())
        ));
      }
    )
  };

  html! {
      <div class="task-fields">
          <input
              class="form-input"
              type="text"
              placeholder="What needs to be done?"
              value={draft.title.clone()}
              oninput={on_title}
              onkeydown={on_title_key}
          />
          <textarea
              class="form-input"
              placeholder="Description (optional)"
              value={draft.description.clone()}
              oninput={on_description}
          />
          <div class="form-row">
              <select
                  class="form-input"
                  value={draft.category.as_key()}
                  onchange={on_category}
              >
                  {
                      for Category::ALL.into_iter().map(|category| html! {
                          <option value={category.as_key()} selected={category == draft.category}>
                              { category.as_key() }
                          </option>
                      })
                  }
              </select>
              <select
                  class="form-input"
                  value={draft.priority.as_key()}
                  onchange={on_priority}
              >
                  {
                      for Priority::ALL.into_iter().map(|priority| html! {
                          <option value={priority.as_key()} selected={priority == draft.priority}>
                              { priority.as_key() }
                          </option>
                      })
                  }
              </select>
              <input
                  class="form-input"
                  type="date"
                  value={format_input_date(draft.due_date)}
                  onchange={on_due}
              />
          </div>
      </div>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bound_select_values_name_an_option()
  {
    let draft = TaskDraft::default();
    assert!(
      Category::ALL
        .iter()
        .any(|c| c.as_key() == draft.category.as_key())
    );
    assert!(
      Priority::ALL
        .iter()
        .any(|p| p.as_key() == draft.priority.as_key())
    );

    for category in Category::ALL {
      assert_eq!(
        Category::from_key(category.as_key()),
        Some(category)
      );
    }
    for priority in Priority::ALL {
      assert_eq!(
        Priority::from_key(priority.as_key()),
        Some(priority)
      );
    }
  }
}
