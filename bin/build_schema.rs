#![allow(unused_imports)]
use dollar_regulator;

extern "Rust" {
    fn module_schema() -> odra::contract_def::ContractBlueprint;
    fn casper_contract_schema() -> odra::schema::casper_contract_schema::ContractSchema;
}

fn main() {
    // both symbols are emitted by the contract selected with ODRA_MODULE
    odra_build::schema(unsafe { module_schema() }, unsafe {
        casper_contract_schema()
    });
}
