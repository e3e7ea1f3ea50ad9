mod config;
mod storage;

use chrono::Utc;
use gloo::console::log;
use taskdeck_core::{
  DraftField,
  Filter,
  Session,
  SortKey,
  TaskId
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use self::config::load_app_config;
use self::storage::BrowserStorage;
use crate::components::{
  FilterBar,
  NoticeBanner,
  ProgressSummary,
  SortSelect,
  TaskForm,
  TaskList
};

type AppSession = Session<BrowserStorage>;

#[function_component(App)]
pub fn app() -> Html {
  let session = use_mut_ref(|| {
    AppSession::open(
      BrowserStorage::open(),
      load_app_config()
    )
  });
  let redraw = use_force_update();

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and session \
         loaded"
      );
      || ()
    });
  }

  let today =
    session.borrow().today(Utc::now());
  let board = session.borrow().board(today);
  let draft =
    session.borrow().draft().clone();

  let on_draft_change = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |field: DraftField| {
        session
          .borrow_mut()
          .draft_mut()
          .set(field);
        redraw.force_update();
      }
    )
  };

  let on_add = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |_: ()| {
      let added = session
        .borrow_mut()
        .submit_draft(Utc::now());
      match added {
        | Some(id) => ui_debug(
          "task.add",
          &format!("added task {id}")
        ),
        | None => ui_debug(
          "task.add",
          "ignored blank title"
        )
      }
      redraw.force_update();
    })
  };

  let on_filter = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |filter: Filter| {
        ui_debug(
          "filter.click",
          filter.as_key()
        );
        session
          .borrow_mut()
          .select_filter(filter);
        redraw.force_update();
      }
    )
  };

  let on_sort = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |sort: SortKey| {
        ui_debug(
          "sort.change",
          sort.as_key()
        );
        session
          .borrow_mut()
          .select_sort(sort);
        redraw.force_update();
      }
    )
  };

  let on_toggle = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      session.borrow_mut().toggle(id);
      redraw.force_update();
    })
  };

  let on_delete = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      ui_debug(
        "task.delete",
        &id.to_string()
      );
      session.borrow_mut().delete(id);
      redraw.force_update();
    })
  };

  let on_edit = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      session.borrow_mut().begin_edit(id);
      redraw.force_update();
    })
  };

  let on_edit_change = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |(id, field): (
        TaskId,
        DraftField
      )| {
        if let Some(draft) = session
          .borrow_mut()
          .edit_draft_mut(id)
        {
          draft.set(field);
        }
        redraw.force_update();
      }
    )
  };

  let on_save = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      ui_debug(
        "task.save",
        &id.to_string()
      );
      session.borrow_mut().save_edit(id);
      redraw.force_update();
    })
  };

  let on_cancel = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      session
        .borrow_mut()
        .cancel_edit(id);
      redraw.force_update();
    })
  };

  let on_dismiss_notice = {
    let session = session.clone();
    let redraw = redraw.clone();
    Callback::from(move |_: ()| {
      session
        .borrow_mut()
        .dismiss_notice();
      redraw.force_update();
    })
  };

  html! {
      <div class="app">
          <header class="app-header">
              <h1>{ "Taskdeck" }</h1>
              <ProgressSummary progress={board.progress} />
          </header>
          <NoticeBanner notice={board.notice.clone()} on_dismiss={on_dismiss_notice} />
          <TaskForm draft={draft} on_change={on_draft_change} on_submit={on_add} />
          <div class="toolbar">
              <FilterBar active={board.filter} counts={board.counts.clone()} on_select={on_filter} />
              <SortSelect active={board.sort} on_change={on_sort} />
          </div>
          <TaskList
              cards={board.cards.clone()}
              empty_message={board.empty_message.clone()}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
              on_edit_change={on_edit_change}
              on_save={on_save}
              on_cancel={on_cancel}
          />
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
