use crate::{
    api::{ASSET_TYPES_PATH, CURRENCIES_PATH},
    components::{
        combobox::{id_value, name_label, AsyncCombobox},
        common::{Button, TextField},
        forms::FormMessages,
    },
    pages::assets::{utils::AssetFormState, view_model::AssetsViewModel},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn CreateAssetForm(vm: AssetsViewModel) -> impl IntoView {
    let form = vm.form;
    let (name, set_name) = create_slice(
        form,
        |f: &AssetFormState| f.name.clone(),
        |f: &mut AssetFormState, v: String| f.name = v,
    );
    let (symbol, set_symbol) = create_slice(
        form,
        |f: &AssetFormState| f.symbol.clone(),
        |f: &mut AssetFormState, v: String| f.symbol = v,
    );
    let (description, set_description) = create_slice(
        form,
        |f: &AssetFormState| f.description.clone(),
        |f: &mut AssetFormState, v: String| f.description = v,
    );

    let asset_type = Signal::derive(move || form.with(|f| f.asset_type_id.clone()));
    let currency = Signal::derive(move || form.with(|f| f.currency_id.clone()));
    let pending = vm.create_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <TextField
                label="Name"
                value=name
                on_input=Callback::new(move |v| set_name.set(v))
                placeholder="Name"
            />
            <TextField
                label="Symbol"
                value=symbol
                on_input=Callback::new(move |v| set_symbol.set(v))
                placeholder="Symbol"
            />
            <TextField
                label="Description (Optional)"
                value=description
                on_input=Callback::new(move |v| set_description.set(v))
                placeholder="A brief description of this asset"
            />
            <div class="space-y-1">
                <span class="text-sm font-medium text-fg">"Asset Type"</span>
                <AsyncCombobox
                    url=ASSET_TYPES_PATH
                    label_of=name_label
                    value_of=id_value
                    value=asset_type
                    on_change=Callback::new(move |next| form.update(|f| f.asset_type_id = next))
                    placeholder="Asset Type"
                    search_param="name"
                />
            </div>
            <div class="space-y-1">
                <span class="text-sm font-medium text-fg">"Currency"</span>
                <AsyncCombobox
                    url=CURRENCIES_PATH
                    label_of=name_label
                    value_of=id_value
                    value=currency
                    on_change=Callback::new(move |next| form.update(|f| f.currency_id = next))
                    placeholder="Currency"
                    search_param="name"
                />
            </div>
            <label class="flex items-center justify-between rounded-lg border border-border p-3">
                <span class="text-sm font-medium text-fg">"Active Asset"</span>
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.is_active)
                    on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                />
            </label>
            <FormMessages messages=vm.messages />
            <div class="flex justify-end">
                <Button attr:type="submit" loading=pending>
                    {move || if pending.get() { "Creating..." } else { "Create" }}
                </Button>
            </div>
        </form>
    }
}
