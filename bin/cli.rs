//! Deploys the regulator with its oracle and runs epoch scenarios against it.

use dollar_regulator::oracle::SettableOracle;
use dollar_regulator::processor::{Regulator, RegulatorInitArgs};
use dollar_regulator::RegulatorConfig;
use odra::casper_types::U256;
use odra::host::{HostEnv, NoArgs};
use odra::prelude::Addressable;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt, OdraCli,
};

const DEPLOY_GAS: u64 = 300_000_000_000;
const STEP_GAS: u64 = 50_000_000_000;
const GENESIS_BONDED: u64 = 1_000_000;

/// Deploys a settable oracle, then the regulator wired to it
pub struct RegulatorDeployScript;

impl DeployScript for RegulatorDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        let oracle = SettableOracle::load_or_deploy(env, NoArgs, container, DEPLOY_GAS)?;
        println!("Oracle deployed at: {:?}", oracle.address());

        let deployer = env.caller();
        let regulator = Regulator::load_or_deploy(
            env,
            RegulatorInitArgs {
                oracle: oracle.address().clone(),
                pool: deployer,
                config: RegulatorConfig::default(),
                genesis_bonded: U256::from(GENESIS_BONDED),
                genesis_supply: U256::zero(),
            },
            container,
            DEPLOY_GAS,
        )?;
        println!("Regulator deployed at: {:?}", regulator.address());

        Ok(())
    }
}

/// Advances one epoch and prints the resulting ledger
pub struct AdvanceEpochScenario;

impl Scenario for AdvanceEpochScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args,
    ) -> Result<(), Error> {
        let mut regulator = container.contract_ref::<Regulator>(env)?;

        env.set_gas(STEP_GAS);
        regulator.advance();

        println!("epoch:      {}", regulator.epoch());
        println!("supply:     {}", regulator.total_supply());
        println!("bonded:     {}", regulator.total_bonded());
        println!("debt:       {}", regulator.total_debt());
        println!("coupons:    {}", regulator.total_coupons());
        println!("redeemable: {}", regulator.total_redeemable());
        Ok(())
    }
}

impl ScenarioMetadata for AdvanceEpochScenario {
    const NAME: &'static str = "advance-epoch";
    const DESCRIPTION: &'static str = "Advances the regulator by one epoch and prints its totals";
}

pub fn main() {
    OdraCli::new()
        .about("CLI tool for the Dollar regulator")
        .deploy(RegulatorDeployScript)
        .contract::<Regulator>()
        .contract::<SettableOracle>()
        .scenario(AdvanceEpochScenario)
        .build()
        .run();
}
