// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only derivations over the transaction set: totals, per-category
//! spending, budget utilization and the date-bucketed series behind the
//! dashboard charts.
//!
//! Every function takes any iterator of `&Transaction`, so callers pick the
//! status scope by filtering before they call in.
//!
//! Sums saturate at `Decimal::MAX` instead of overflowing, and a ratio that
//! does not fit is reported as `Decimal::MAX`.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{
    Account, Budget, Category, Client, Transaction, TransactionStatus, TransactionType, Vendor,
};

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Default length of the dashboard's daily series.
pub const TREND_DAYS: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Income, expense and balance; `status` restricts both sums to one status.
pub fn totals<'a, I>(transactions: I, status: Option<TransactionStatus>) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions {
        if status.is_some_and(|s| t.status != s) {
            continue;
        }
        match t.r#type {
            TransactionType::Income => income = income.saturating_add(t.amount),
            TransactionType::Expense => expenses = expenses.saturating_add(t.amount),
        }
    }
    Totals {
        income,
        expenses,
        balance: income.saturating_sub(expenses),
    }
}

/// Summed expense amount per category id. Categories without expenses are absent.
pub fn spending_by_category<'a, I>(transactions: I) -> BTreeMap<i64, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut spending = BTreeMap::new();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        let sum = spending.entry(t.category_id).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.amount);
    }
    spending
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUtilization {
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub over_budget: bool,
}

/// How much of a budget its category has used.
///
/// A budget of zero or less reports 0%; `over_budget` still compares the raw
/// amounts, so any spending against a zero budget is over.
pub fn budget_utilization(budget: &Budget, spending: &BTreeMap<i64, Decimal>) -> BudgetUtilization {
    let spent = spending
        .get(&budget.category_id)
        .copied()
        .unwrap_or(Decimal::ZERO);
    let limit = budget.monthly_budget;
    let percentage = if limit > Decimal::ZERO {
        spent
            .checked_div(limit)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    BudgetUtilization {
        spent,
        remaining: limit.saturating_sub(spent),
        percentage,
        over_budget: spent > limit,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense per date, one entry per requested date, in order.
pub fn series_by_date<'a, I>(transactions: I, dates: &[NaiveDate]) -> Vec<DayTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_date: HashMap<NaiveDate, (Decimal, Decimal)> = HashMap::new();
    for t in transactions {
        let slot = by_date.entry(t.date).or_default();
        match t.r#type {
            TransactionType::Income => slot.0 = slot.0.saturating_add(t.amount),
            TransactionType::Expense => slot.1 = slot.1.saturating_add(t.amount),
        }
    }
    dates
        .iter()
        .map(|date| {
            let (income, expense) = by_date.get(date).copied().unwrap_or_default();
            DayTotals {
                date: *date,
                income,
                expense,
            }
        })
        .collect()
}

/// Summed expense amount per `YYYY-MM`.
pub fn series_by_month<'a, I>(transactions: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months = BTreeMap::new();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        let sum = months.entry(t.month()).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(t.amount);
    }
    months
}

/// A `days`-long run of dates, oldest first, ending at the latest transaction
/// date (or at `today` when there are no transactions). The run is cut short
/// at the earliest representable date.
pub fn trailing_dates<'a, I>(transactions: I, today: NaiveDate, days: usize) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let end = transactions
        .into_iter()
        .map(|t| t.date)
        .max()
        .unwrap_or(today);
    let mut dates: Vec<NaiveDate> = (0..days as u64)
        .map_while(|back| end.checked_sub_days(Days::new(back)))
        .collect();
    dates.reverse();
    dates
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub net_profit: Decimal,
    pub pending_transactions: usize,
    pub overdue_transactions: usize,
    pub transaction_count: usize,
}

/// Dashboard headline numbers. Money totals count completed transactions only.
pub fn kpis(transactions: &[Transaction]) -> Kpis {
    let sums = totals(transactions, Some(TransactionStatus::Completed));
    let count = |status: TransactionStatus| {
        transactions.iter().filter(|t| t.status == status).count()
    };
    Kpis {
        total_income: sums.income,
        total_expenses: sums.expenses,
        balance: sums.balance,
        net_profit: sums.balance.max(Decimal::ZERO),
        pending_transactions: count(TransactionStatus::Pending),
        overdue_transactions: count(TransactionStatus::Overdue),
        transaction_count: transactions.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category_id: i64,
    pub name: String,
    pub color: String,
    pub total: Decimal,
}

/// Expense categories with spending, largest first, at most `limit` of them.
pub fn top_expense_categories<'a, I>(
    categories: &[Category],
    transactions: I,
    limit: usize,
) -> Vec<CategorySpend>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let spending = spending_by_category(transactions);
    let mut rows: Vec<CategorySpend> = categories
        .iter()
        .filter(|c| c.r#type == TransactionType::Expense)
        .filter_map(|c| {
            let total = spending.get(&c.id).copied()?;
            (total > Decimal::ZERO).then(|| CategorySpend {
                category_id: c.id,
                name: c.name.clone(),
                color: c.color.clone(),
                total,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));
    rows.truncate(limit);
    rows
}

pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .fold(Decimal::ZERO, |sum, a| sum.saturating_add(a.balance))
}

pub fn category_label(categories: &[Category], id: i64) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(UNKNOWN_LABEL, |c| c.name.as_str())
}

pub fn account_label(accounts: &[Account], id: Option<i64>) -> &str {
    id.and_then(|id| accounts.iter().find(|a| a.id == id))
        .map_or(UNKNOWN_LABEL, |a| a.name.as_str())
}

/// Name of the client (income) or vendor (expense) a transaction points at,
/// or an empty label when there is none.
pub fn contact_label<'a>(
    clients: &'a [Client],
    vendors: &'a [Vendor],
    transaction: &Transaction,
) -> &'a str {
    let Some(id) = transaction.client_vendor_id else {
        return "";
    };
    let name = match transaction.r#type {
        TransactionType::Income => clients.iter().find(|c| c.id == id).map(|c| c.name.as_str()),
        TransactionType::Expense => vendors.iter().find(|v| v.id == id).map(|v| v.name.as_str()),
    };
    name.unwrap_or("")
}
