use fieldmark_proto::field::field_service_client::FieldServiceClient;
use std::cell::RefCell;
use std::rc::Rc;
use tonic_web_wasm_client::Client;
use yew::prelude::*;

#[hook]
pub fn use_field_service() -> Rc<RefCell<FieldServiceClient<Client>>> {
    let client = use_mut_ref(|| {
        let Some(window) = web_sys::window() else {
            panic!("No window object available");
        };
        let origin = window.location().origin().unwrap();
        let client = Client::new(format!("{}/grpc", origin));
        FieldServiceClient::new(client)
    });
    client
}
