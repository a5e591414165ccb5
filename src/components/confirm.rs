use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub message: AttrValue,
    pub on_answer: Callback<bool>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let answer = |yes: bool| {
        let on_answer = props.on_answer.clone();
        Callback::from(move |_: MouseEvent| on_answer.emit(yes))
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-sm bg-card border border-border rounded-2xl shadow-lg p-6">
                <p class="text-foreground text-sm">{ props.message.clone() }</p>
                <div class="mt-6 flex gap-3 justify-end">
                    <button type="button" onclick={answer(false)} class="px-4 py-2 rounded-[10px] text-sm font-bold bg-secondary text-secondary-foreground">{"Cancel"}</button>
                    <button type="button" onclick={answer(true)} class="px-4 py-2 rounded-[10px] text-sm font-bold bg-red-600 text-white">{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}
