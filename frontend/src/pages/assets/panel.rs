use crate::{
    components::{
        common::ButtonVariant,
        dialog::FormDialog,
        forms::FormMessages,
    },
    pages::assets::{
        components::{AssetsTable, CreateAssetForm},
        view_model::use_assets_view_model,
    },
};
use leptos::*;

#[component]
pub fn AssetsPage() -> impl IntoView {
    let vm = use_assets_view_model();
    let is_open = Signal::derive(move || vm.dialog_open.get());

    view! {
        <div class="space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-xl font-semibold text-fg">"Assets"</h2>
                <button
                    type="button"
                    class=format!("inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Primary.classes())
                    on:click=move |_| vm.open_dialog()
                >
                    <i class="fas fa-plus-circle mr-2"></i>
                    "Add Asset"
                </button>
            </div>
            <Show when=move || !vm.dialog_open.get()>
                <FormMessages messages=vm.messages />
            </Show>
            <AssetsTable />
            <FormDialog
                is_open=is_open
                title="Create New Asset"
                description="Create a new asset."
                on_close=Callback::new(move |_| vm.close_dialog())
            >
                <CreateAssetForm vm=vm />
            </FormDialog>
        </div>
    }
}
