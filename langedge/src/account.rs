//! Account information

use crate::models::{Account, Balance, Stat};
use crate::transport::ACCOUNT_PATH;
use crate::{Client, Error};
use std::collections::BTreeMap;

impl Client {
    pub async fn get_my_account(&self) -> Result<Account, Error> {
        self.get(ACCOUNT_PATH, "me", BTreeMap::new()).await
    }

    pub async fn get_balance(&self) -> Result<Balance, Error> {
        self.get(ACCOUNT_PATH, "balance", BTreeMap::new()).await
    }

    pub async fn get_stats(&self) -> Result<Stat, Error> {
        self.get(ACCOUNT_PATH, "stats", BTreeMap::new()).await
    }
}
