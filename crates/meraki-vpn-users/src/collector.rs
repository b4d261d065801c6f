//! Input collection: organization, networks, action and user records.

use std::path::Path;

use meraki_vpn_dashboard::DashboardApi;
use meraki_vpn_types::{mark_security_appliances, Action, Network, Organization, VpnUserRecord};
use tracing::{debug, info};

use crate::config::WorkflowConfig;
use crate::error::{Result, UserError};
use crate::import::CsvImporter;
use crate::interaction::{InputSource, OutputSink};
use crate::password::generate_password;
use crate::validator::dedupe_by_email;

/// How user records are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Manual,
    Csv,
}

/// Menu entries offered for choosing the action and input method
const ACTION_MENU: [(Action, InputMethod, &str); 4] = [
    (Action::Provision, InputMethod::Manual, "Add user(s) - enter manually"),
    (Action::Provision, InputMethod::Csv, "Add user(s) - upload a local CSV file"),
    (Action::Deauthorize, InputMethod::Manual, "Deauthorize user(s) - enter manually"),
    (Action::Deauthorize, InputMethod::Csv, "Deauthorize user(s) - upload a local CSV file"),
];

const ALL_NETWORKS: &str = "All networks";

/// What the operator asked for
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub action: Action,
    pub organization: Organization,
    pub networks: Vec<Network>,
    pub records: Vec<VpnUserRecord>,
}

pub struct InputCollector<'a, A: DashboardApi + ?Sized> {
    api: &'a A,
    config: &'a WorkflowConfig,
}

impl<'a, A: DashboardApi + ?Sized> InputCollector<'a, A> {
    pub fn new(api: &'a A, config: &'a WorkflowConfig) -> Self {
        Self { api, config }
    }

    /// Organizations visible to the API key; an empty list is a setup error
    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        let organizations = self.api.list_organizations().await?;
        if organizations.is_empty() {
            return Err(UserError::NoOrganizations);
        }
        info!(count = organizations.len(), "retrieved organizations");
        Ok(organizations)
    }

    pub async fn collect(
        &self,
        organizations: Vec<Organization>,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<RunPlan> {
        let organization = self.select_organization(organizations, input, output)?;
        let candidates = self.eligible_networks(&organization).await?;
        let networks = self.select_networks(&candidates, input, output)?;
        let (action, method) = self.select_action(input)?;

        let records = match method {
            InputMethod::Manual => self.collect_manual(action, input, output)?,
            InputMethod::Csv => self.collect_csv(action, input, output)?,
        };

        let (records, duplicates) = dedupe_by_email(records);
        for warning in &duplicates {
            output.warn(warning);
        }

        if records.is_empty() {
            return Err(UserError::NoRecords);
        }

        for record in records.iter().filter(|r| !networks.iter().any(|n| r.applies_to(n))) {
            output.warn(&format!(
                "{} is not scoped to any selected network and will be skipped",
                record.display_name()
            ));
        }

        Ok(RunPlan {
            action,
            organization,
            networks,
            records,
        })
    }

    /// Use the only organization without asking, otherwise prompt by index
    pub fn select_organization(
        &self,
        mut organizations: Vec<Organization>,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Organization> {
        match organizations.len() {
            0 => Err(UserError::NoOrganizations),
            1 => {
                let organization = organizations.remove(0);
                output.info(&format!("Working with organization: {}", organization.name));
                Ok(organization)
            }
            _ => {
                let names: Vec<String> = organizations.iter().map(|o| o.name.clone()).collect();
                let index = input.select("Select an organization", &names)?;
                if index >= organizations.len() {
                    return Err(UserError::InputError(format!(
                        "organization selection {} is out of range",
                        index
                    )));
                }
                let organization = organizations.swap_remove(index);
                output.info(&format!("Working with organization: {}", organization.name));
                Ok(organization)
            }
        }
    }

    /// Networks of the organization sorted by name. With the MX filter on,
    /// the device inventory is consulted and networks without an appliance
    /// are dropped; with it off the inventory is never requested.
    pub async fn eligible_networks(&self, organization: &Organization) -> Result<Vec<Network>> {
        let networks = self.api.list_networks(&organization.id).await?;
        let total = networks.len();

        let networks = if self.config.filter_only_mx_networks {
            let devices = self.api.list_devices(&organization.id).await?;
            mark_security_appliances(networks, &devices, true)
        } else {
            mark_security_appliances(networks, &[], false)
        };
        debug!(
            total,
            eligible = networks.len(),
            filter_only_mx = self.config.filter_only_mx_networks,
            "filtered networks"
        );

        if networks.is_empty() {
            return Err(UserError::NoEligibleNetworks(organization.name.clone()));
        }
        Ok(networks)
    }

    pub fn select_networks(
        &self,
        candidates: &[Network],
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Vec<Network>> {
        output.info(&format!("Found {} networks", candidates.len()));

        let mut items = vec![ALL_NETWORKS.to_string()];
        items.extend(candidates.iter().map(|n| n.name.clone()));

        loop {
            let picked = input.multi_select("Select one or more networks", &items)?;

            let selected: Vec<Network> = if picked.contains(&0) {
                candidates.to_vec()
            } else {
                picked
                    .iter()
                    .filter_map(|&index| candidates.get(index.wrapping_sub(1)))
                    .cloned()
                    .collect()
            };

            if selected.is_empty() {
                output.warn("No networks selected. Please pick at least one.");
                continue;
            }

            let names: Vec<&str> = selected.iter().map(|n| n.name.as_str()).collect();
            output.info(&format!("Selected networks: {}", names.join(", ")));
            if input.confirm("Confirm network selection?", true)? {
                return Ok(selected);
            }
        }
    }

    pub fn select_action(&self, input: &mut dyn InputSource) -> Result<(Action, InputMethod)> {
        let items: Vec<String> = ACTION_MENU.iter().map(|(_, _, label)| label.to_string()).collect();
        let index = input.select("How would you like to input user info?", &items)?;
        ACTION_MENU
            .get(index)
            .map(|(action, method, _)| (*action, *method))
            .ok_or_else(|| UserError::InputError(format!("menu selection {} is out of range", index)))
    }

    /// Prompt field by field until the operator has no more users to add
    pub fn collect_manual(
        &self,
        action: Action,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Vec<VpnUserRecord>> {
        let mut records = Vec::new();

        loop {
            output.info("Please provide the following details:");
            let record = match action {
                Action::Deauthorize => VpnUserRecord::deauthorize(input.input("Email")?.trim()),
                Action::Provision => {
                    let name = input.input("Name")?;
                    let email = input.input("Email")?;
                    let password = input.password("Password (leave blank to auto-generate)")?;
                    let record = VpnUserRecord::provision(name.trim(), email.trim(), password.clone());
                    if password.is_empty() {
                        record.with_generated_password(generate_password())
                    } else {
                        record
                    }
                }
            };

            if input.confirm("Is the information correct?", true)? {
                records.push(record);
            }

            if !input.confirm("Add another user?", false)? {
                return Ok(records);
            }
        }
    }

    /// Prompt for a CSV file until one is read and confirmed
    pub fn collect_csv(
        &self,
        action: Action,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Vec<VpnUserRecord>> {
        let importer = CsvImporter::new(action);

        loop {
            output.info(&format!("CSV format: {}", importer.layout()));
            let path = input.input("File name")?;

            let import = match importer.import_file(Path::new(path.trim())) {
                Ok(import) => import,
                Err(e) => {
                    output.warn(&format!("Could not read '{}': {}. Please try again.", path.trim(), e));
                    continue;
                }
            };

            for warning in &import.warnings {
                output.warn(warning);
            }

            output.info(&format!(
                "CSV processed: {} user records, {} rows skipped",
                import.records.len(),
                import.warnings.len()
            ));
            if input.confirm("Proceed?", true)? {
                return Ok(import.records);
            }
        }
    }
}
