use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
  pub notice:     Option<String>,
  pub on_dismiss: Callback<()>
}

#[function_component(NoticeBanner)]
pub fn notice_banner(
  props: &NoticeBannerProps
) -> Html {
  let Some(notice) = props.notice.clone()
  else {
    return html! {};
  };
  let on_dismiss =
    props.on_dismiss.clone();

  html! {
      <div class="notice" role="alert">
          <span>{ notice }</span>
          <button class="btn" onclick={move |_| on_dismiss.emit(())}>{ "Dismiss" }</button>
      </div>
  }
}
