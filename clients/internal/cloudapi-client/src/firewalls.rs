// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use crate::{CREATED, Client, CreateFirewallRuleRequest, Error, FirewallRule, Machine, Request, Result};

impl Client {
    pub async fn list_firewall_rules(&self) -> Result<Vec<FirewallRule>> {
        self.execute(
            Request::get(&["fwrules"]),
            "failed to get list of firewall rules",
        )
        .await
    }

    pub async fn get_firewall_rule(&self, id: &str) -> Result<FirewallRule> {
        self.execute(
            Request::get(&["fwrules", id]),
            format!("failed to get firewall rule with id {id}"),
        )
        .await
    }

    pub async fn create_firewall_rule(
        &self,
        opts: &CreateFirewallRuleRequest,
    ) -> Result<FirewallRule> {
        let context = format!("failed to create firewall rule: {}", opts.rule);
        let request = Request::post(&["fwrules"])
            .expect(CREATED)
            .json(opts)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn update_firewall_rule(
        &self,
        id: &str,
        opts: &CreateFirewallRuleRequest,
    ) -> Result<FirewallRule> {
        let context = format!("failed to update firewall rule with id {id} to {}", opts.rule);
        let request = Request::post(&["fwrules", id])
            .json(opts)
            .map_err(|e| Error::new(&context, e))?;
        self.execute(request, context).await
    }

    pub async fn enable_firewall_rule(&self, id: &str) -> Result<FirewallRule> {
        self.execute(
            Request::post(&["fwrules", id, "enable"]),
            format!("failed to enable firewall rule with id {id}"),
        )
        .await
    }

    pub async fn disable_firewall_rule(&self, id: &str) -> Result<FirewallRule> {
        self.execute(
            Request::post(&["fwrules", id, "disable"]),
            format!("failed to disable firewall rule with id {id}"),
        )
        .await
    }

    pub async fn delete_firewall_rule(&self, id: &str) -> Result<()> {
        self.execute_empty(
            Request::delete(&["fwrules", id]),
            format!("failed to delete firewall rule with id {id}"),
        )
        .await
    }

    /// Machines the rule applies to
    pub async fn list_firewall_rule_machines(&self, id: &str) -> Result<Vec<Machine>> {
        self.execute(
            Request::get(&["fwrules", id, "machines"]),
            format!("failed to list machines affected by firewall rule with id {id}"),
        )
        .await
    }
}
