// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("color pattern is valid")
});

/// The six named collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    Transactions,
    Categories,
    Accounts,
    Clients,
    Vendors,
    Budgets,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 6] = [
        Self::Transactions,
        Self::Categories,
        Self::Accounts,
        Self::Clients,
        Self::Vendors,
        Self::Budgets,
    ];

    /// Collection name as used in export documents and REST paths.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Categories => "categories",
            Self::Accounts => "accounts",
            Self::Clients => "clients",
            Self::Vendors => "vendors",
            Self::Budgets => "budgets",
        }
    }

    /// Durable storage key.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Transactions => "moneyflow_transactions",
            Self::Categories => "moneyflow_categories",
            Self::Accounts => "moneyflow_accounts",
            Self::Clients => "moneyflow_clients",
            Self::Vendors => "moneyflow_vendors",
            Self::Budgets => "moneyflow_budgets",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(StoreError::Validation(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

string_enum!(TransactionType {
    Income => "income",
    Expense => "expense",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Overdue,
}

string_enum!(TransactionStatus {
    Completed => "completed",
    Pending => "pending",
    Overdue => "overdue",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Investment,
}

string_enum!(AccountType {
    Checking => "checking",
    Savings => "savings",
    Credit => "credit",
    Investment => "investment",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
}

string_enum!(ContactStatus {
    Active => "active",
    Inactive => "inactive",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category_id: i64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_vendor_id: Option<i64>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub recurring: bool,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Calendar month of the transaction as `YYYY-MM`.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub r#type: TransactionType,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub low_balance_threshold: Option<Decimal>,
}

impl Account {
    /// True when a threshold is set and the balance has dropped below it.
    pub fn is_low_balance(&self) -> bool {
        self.low_balance_threshold
            .is_some_and(|threshold| self.balance < threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    #[serde(default)]
    pub status: ContactStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, alias = "defaultCategory")]
    pub category: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(default)]
    pub status: ContactStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: i64,
    pub category_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_budget: Decimal,
}

/// All six collections, in the shape used by export documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
    pub clients: Vec<Client>,
    pub vendors: Vec<Vendor>,
    pub budgets: Vec<Budget>,
}

/// A record kind that lives in one of the store's collections.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Typed partial update for this kind.
    type Patch;

    const KIND: CollectionKind;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn apply(&mut self, patch: Self::Patch);

    fn validate(&self) -> StoreResult<()>;

    /// Key used to address the record on a remote backend.
    fn remote_id(&self) -> i64 {
        self.id()
    }

    /// Check the record's foreign keys against the other collections.
    fn check_references(&self, _data: &Collections) -> StoreResult<()> {
        Ok(())
    }

    /// Whether `other` occupies the slot this record would need, for kinds
    /// that allow one record per key by convention.
    fn duplicates(&self, _other: &Self) -> bool {
        false
    }

    fn collection(data: &Collections) -> &Vec<Self>;

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self>;
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn require_name(kind: &str, name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} name is required", kind)));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> StoreResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(StoreError::Validation(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub r#type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub account_id: Option<Option<i64>>,
    pub client_vendor_id: Option<Option<i64>>,
    pub status: Option<TransactionStatus>,
    pub recurring: Option<bool>,
}

impl Entity for Transaction {
    type Patch = TransactionPatch;

    const KIND: CollectionKind = CollectionKind::Transactions;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: TransactionPatch) {
        set(&mut self.description, patch.description);
        set(&mut self.amount, patch.amount);
        set(&mut self.r#type, patch.r#type);
        set(&mut self.category_id, patch.category_id);
        set(&mut self.date, patch.date);
        set(&mut self.notes, patch.notes);
        set(&mut self.account_id, patch.account_id);
        set(&mut self.client_vendor_id, patch.client_vendor_id);
        set(&mut self.status, patch.status);
        set(&mut self.recurring, patch.recurring);
    }

    fn validate(&self) -> StoreResult<()> {
        if self.description.trim().is_empty() {
            return Err(StoreError::Validation(
                "transaction description is required".into(),
            ));
        }
        require_non_negative("amount", self.amount)
    }

    fn check_references(&self, data: &Collections) -> StoreResult<()> {
        let Some(category) = data.categories.iter().find(|c| c.id == self.category_id) else {
            return Err(StoreError::Integrity(format!(
                "transaction {} references unknown category {}",
                self.id, self.category_id
            )));
        };
        if category.r#type != self.r#type {
            return Err(StoreError::Integrity(format!(
                "transaction {} is {} but category '{}' is {}",
                self.id, self.r#type, category.name, category.r#type
            )));
        }
        if let Some(account_id) = self.account_id {
            if !data.accounts.iter().any(|a| a.id == account_id) {
                return Err(StoreError::Integrity(format!(
                    "transaction {} references unknown account {}",
                    self.id, account_id
                )));
            }
        }
        Ok(())
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.transactions
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.transactions
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub r#type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
}

impl Entity for Category {
    type Patch = CategoryPatch;

    const KIND: CollectionKind = CollectionKind::Categories;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: CategoryPatch) {
        set(&mut self.name, patch.name);
        set(&mut self.r#type, patch.r#type);
        set(&mut self.color, patch.color);
        set(&mut self.icon, patch.icon);
    }

    fn validate(&self) -> StoreResult<()> {
        require_name("category", &self.name)?;
        if !HEX_COLOR.is_match(&self.color) {
            return Err(StoreError::Validation(format!(
                "category color '{}' is not a hex color like #3b82f6",
                self.color
            )));
        }
        Ok(())
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.categories
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.categories
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub r#type: Option<AccountType>,
    pub balance: Option<Decimal>,
    pub institution: Option<Option<String>>,
    pub low_balance_threshold: Option<Option<Decimal>>,
}

impl Entity for Account {
    type Patch = AccountPatch;

    const KIND: CollectionKind = CollectionKind::Accounts;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: AccountPatch) {
        set(&mut self.name, patch.name);
        set(&mut self.r#type, patch.r#type);
        set(&mut self.balance, patch.balance);
        set(&mut self.institution, patch.institution);
        set(&mut self.low_balance_threshold, patch.low_balance_threshold);
    }

    fn validate(&self) -> StoreResult<()> {
        require_name("account", &self.name)
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.accounts
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.accounts
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_terms: Option<Option<String>>,
    pub total_paid: Option<Decimal>,
    pub status: Option<ContactStatus>,
}

impl Entity for Client {
    type Patch = ClientPatch;

    const KIND: CollectionKind = CollectionKind::Clients;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: ClientPatch) {
        set(&mut self.name, patch.name);
        set(&mut self.email, patch.email);
        set(&mut self.phone, patch.phone);
        set(&mut self.address, patch.address);
        set(&mut self.payment_terms, patch.payment_terms);
        set(&mut self.total_paid, patch.total_paid);
        set(&mut self.status, patch.status);
    }

    fn validate(&self) -> StoreResult<()> {
        require_name("client", &self.name)?;
        require_non_negative("totalPaid", self.total_paid)
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.clients
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.clients
    }
}

#[derive(Debug, Clone, Default)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub total_spent: Option<Decimal>,
    pub status: Option<ContactStatus>,
}

impl Entity for Vendor {
    type Patch = VendorPatch;

    const KIND: CollectionKind = CollectionKind::Vendors;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: VendorPatch) {
        set(&mut self.name, patch.name);
        set(&mut self.email, patch.email);
        set(&mut self.phone, patch.phone);
        set(&mut self.address, patch.address);
        set(&mut self.category, patch.category);
        set(&mut self.total_spent, patch.total_spent);
        set(&mut self.status, patch.status);
    }

    fn validate(&self) -> StoreResult<()> {
        require_name("vendor", &self.name)?;
        require_non_negative("totalSpent", self.total_spent)
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.vendors
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.vendors
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub category_id: Option<i64>,
    pub monthly_budget: Option<Decimal>,
}

impl Entity for Budget {
    type Patch = BudgetPatch;

    const KIND: CollectionKind = CollectionKind::Budgets;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn apply(&mut self, patch: BudgetPatch) {
        set(&mut self.category_id, patch.category_id);
        set(&mut self.monthly_budget, patch.monthly_budget);
    }

    fn validate(&self) -> StoreResult<()> {
        require_non_negative("monthlyBudget", self.monthly_budget)
    }

    // The REST backend keys budgets by category.
    fn remote_id(&self) -> i64 {
        self.category_id
    }

    fn check_references(&self, data: &Collections) -> StoreResult<()> {
        if data.categories.iter().any(|c| c.id == self.category_id) {
            Ok(())
        } else {
            Err(StoreError::Integrity(format!(
                "budget {} references unknown category {}",
                self.id, self.category_id
            )))
        }
    }

    fn duplicates(&self, other: &Self) -> bool {
        self.category_id == other.category_id
    }

    fn collection(data: &Collections) -> &Vec<Self> {
        &data.budgets
    }

    fn collection_mut(data: &mut Collections) -> &mut Vec<Self> {
        &mut data.budgets
    }
}

/// A subset of the collections; `None` means "not included".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCollections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Account>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vec<Vendor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<Budget>>,
}

impl PartialCollections {
    /// Kinds present in this subset, in canonical order.
    pub fn kinds(&self) -> Vec<CollectionKind> {
        let present = [
            self.transactions.is_some(),
            self.categories.is_some(),
            self.accounts.is_some(),
            self.clients.is_some(),
            self.vendors.is_some(),
            self.budgets.is_some(),
        ];
        CollectionKind::ALL
            .into_iter()
            .zip(present)
            .filter_map(|(kind, is_present)| is_present.then_some(kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    /// Copy every included collection into `target`, leaving the rest alone.
    pub fn merge_into(self, target: &mut Collections) {
        if let Some(v) = self.transactions {
            target.transactions = v;
        }
        if let Some(v) = self.categories {
            target.categories = v;
        }
        if let Some(v) = self.accounts {
            target.accounts = v;
        }
        if let Some(v) = self.clients {
            target.clients = v;
        }
        if let Some(v) = self.vendors {
            target.vendors = v;
        }
        if let Some(v) = self.budgets {
            target.budgets = v;
        }
    }
}

impl From<Collections> for PartialCollections {
    fn from(c: Collections) -> Self {
        Self {
            transactions: Some(c.transactions),
            categories: Some(c.categories),
            accounts: Some(c.accounts),
            clients: Some(c.clients),
            vendors: Some(c.vendors),
            budgets: Some(c.budgets),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Purple,
    Green,
}

string_enum!(Theme {
    Blue => "blue",
    Purple => "purple",
    Green => "green",
});

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blue => "Ocean Blue",
            Self::Purple => "Purple Dream",
            Self::Green => "Nature Green",
        }
    }
}
