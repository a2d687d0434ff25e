use crate::{
    api::ASSETS_PATH,
    components::{
        combobox::{id_value, AsyncCombobox},
        common::{Button, TextField},
        forms::FormMessages,
    },
    pages::portfolio_details::{
        utils::{asset_label, HoldingFormState},
        view_model::PortfolioDetailsViewModel,
    },
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn AddHoldingForm(vm: PortfolioDetailsViewModel) -> impl IntoView {
    let form = vm.form;
    let (quantity, set_quantity) = create_slice(
        form,
        |f: &HoldingFormState| f.quantity.clone(),
        |f: &mut HoldingFormState, v: String| f.quantity = v,
    );
    let asset = Signal::derive(move || form.with(|f| f.asset_id.clone()));
    let pending = vm.add_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <div class="space-y-1">
                <span class="text-sm font-medium text-fg">"Asset"</span>
                <AsyncCombobox
                    url=ASSETS_PATH
                    label_of=asset_label
                    value_of=id_value
                    value=asset
                    on_change=Callback::new(move |next| form.update(|f| f.asset_id = next))
                    placeholder="Select Asset"
                    search_placeholder="Search asset..."
                    empty_message="No asset found."
                    search_param="name"
                />
            </div>
            <TextField
                label="Quantity"
                value=quantity
                on_input=Callback::new(move |v| set_quantity.set(v))
                input_type="number"
                placeholder="0.00"
            />
            <FormMessages messages=vm.messages />
            <div class="flex justify-end">
                <Button attr:type="submit" loading=pending>
                    {move || if pending.get() { "Adding..." } else { "Add Holding" }}
                </Button>
            </div>
        </form>
    }
}
