use crate::{
    api::CURRENCIES_PATH,
    components::{
        combobox::{id_value, name_label, AsyncCombobox},
        common::{Button, TextField},
        forms::FormMessages,
    },
    pages::portfolios::{utils::PortfolioFormState, view_model::PortfoliosViewModel},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn CreatePortfolioForm(vm: PortfoliosViewModel) -> impl IntoView {
    let form = vm.form;
    let (name, set_name) = create_slice(
        form,
        |f: &PortfolioFormState| f.name.clone(),
        |f: &mut PortfolioFormState, v: String| f.name = v,
    );
    let (description, set_description) = create_slice(
        form,
        |f: &PortfolioFormState| f.description.clone(),
        |f: &mut PortfolioFormState, v: String| f.description = v,
    );
    let currency = Signal::derive(move || form.with(|f| f.base_currency_id.clone()));
    let pending = vm.create_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <TextField
                label="Portfolio Name"
                value=name
                on_input=Callback::new(move |v| set_name.set(v))
                placeholder="My Investment Portfolio"
            />
            <TextField
                label="Description"
                value=description
                on_input=Callback::new(move |v| set_description.set(v))
                placeholder="A brief description of this portfolio"
            />
            <div class="space-y-1">
                <span class="text-sm font-medium text-fg">"Base Currency"</span>
                <AsyncCombobox
                    url=CURRENCIES_PATH
                    label_of=name_label
                    value_of=id_value
                    value=currency
                    on_change=Callback::new(move |next| form.update(|f| f.base_currency_id = next))
                    placeholder="Select currency"
                    search_placeholder="Search currency..."
                    empty_message="No currency found."
                    search_param="name"
                />
            </div>
            <label class="flex items-center justify-between rounded-lg border border-border p-3">
                <span class="text-sm font-medium text-fg">"Active Portfolio"</span>
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.is_active)
                    on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                />
            </label>
            <FormMessages messages=vm.messages />
            <div class="flex justify-end">
                <Button attr:type="submit" loading=pending>
                    {move || if pending.get() { "Creating..." } else { "Create Portfolio" }}
                </Button>
            </div>
        </form>
    }
}
