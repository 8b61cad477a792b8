// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Built-in sample data used when storage holds nothing usable.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    Account, AccountType, Budget, Category, Client, Collections, ContactStatus, Transaction,
    TransactionStatus, TransactionType, Vendor,
};

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, d).unwrap_or_default()
}

pub fn categories() -> Vec<Category> {
    use TransactionType::{Expense, Income};

    [
        (1, "Food & Dining", Expense, "#ef4444", "🍽️"),
        (2, "Transportation", Expense, "#f97316", "🚗"),
        (3, "Shopping", Expense, "#eab308", "🛍️"),
        (4, "Entertainment", Expense, "#22c55e", "🎬"),
        (5, "Bills & Utilities", Expense, "#3b82f6", "💡"),
        (6, "Healthcare", Expense, "#8b5cf6", "🏥"),
        (7, "Education", Expense, "#ec4899", "📚"),
        (8, "Salary", Income, "#10b981", "💰"),
        (9, "Freelance", Income, "#06b6d4", "💼"),
        (10, "Investment", Income, "#84cc16", "📈"),
    ]
    .into_iter()
    .map(|(id, name, r#type, color, icon)| Category {
        id,
        name: name.into(),
        r#type,
        color: color.into(),
        icon: Some(icon.into()),
    })
    .collect()
}

pub fn accounts() -> Vec<Account> {
    [
        (1, "Checking Account", AccountType::Checking, 250000, "Bank of America"),
        (2, "Savings Account", AccountType::Savings, 875050, "Chase Bank"),
        (3, "Credit Card", AccountType::Credit, -125025, "Capital One"),
        (4, "Investment Account", AccountType::Investment, 1542075, "Fidelity"),
    ]
    .into_iter()
    .map(|(id, name, r#type, cents, institution)| Account {
        id,
        name: name.into(),
        r#type,
        balance: money(cents),
        institution: Some(institution.into()),
        low_balance_threshold: None,
    })
    .collect()
}

pub fn transactions() -> Vec<Transaction> {
    use TransactionType::{Expense, Income};

    [
        (1, "Grocery Store", 8550, Expense, 1, 15, "Weekly groceries"),
        (2, "Salary Deposit", 300000, Income, 8, 14, "Monthly salary"),
        (3, "Gas Station", 4520, Expense, 2, 13, "Fuel"),
        (4, "Coffee Shop", 1275, Expense, 1, 12, "Morning coffee"),
        (5, "Freelance Project", 50000, Income, 9, 11, "Web design project"),
        (6, "Uber Ride", 2450, Expense, 2, 10, "To office"),
        (7, "Netflix Subscription", 1599, Expense, 4, 9, "Monthly subscription"),
        (8, "Pharmacy", 3240, Expense, 6, 8, "Medicine"),
    ]
    .into_iter()
    .map(
        |(id, description, cents, r#type, category_id, d, notes)| Transaction {
            id,
            description: description.into(),
            amount: money(cents),
            r#type,
            category_id,
            date: day(d),
            notes: Some(notes.into()),
            account_id: None,
            client_vendor_id: None,
            status: TransactionStatus::Completed,
            recurring: false,
        },
    )
    .collect()
}

pub fn clients() -> Vec<Client> {
    [
        (1, "ABC Corporation", "contact@abc-corp.com", "+1-555-0123", "123 Business Ave, NY", 1542050),
        (2, "XYZ Enterprises", "info@xyz-ent.com", "+1-555-0456", "456 Commerce St, CA", 875000),
        (3, "Tech Solutions Ltd", "hello@techsol.com", "+1-555-0789", "789 Innovation Dr, TX", 1230075),
    ]
    .into_iter()
    .map(|(id, name, email, phone, address, cents)| Client {
        id,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        payment_terms: None,
        total_paid: money(cents),
        status: ContactStatus::Active,
    })
    .collect()
}

pub fn vendors() -> Vec<Vendor> {
    [
        (1, "Office Supply Co", "orders@officesupply.com", "+1-555-1111", "100 Supply St, NY", "Office Supplies", 245075),
        (2, "Tech Equipment Ltd", "sales@techequip.com", "+1-555-2222", "200 Tech Ave, CA", "Technology", 890050),
        (3, "Marketing Agency", "info@marketing.com", "+1-555-3333", "300 Marketing Blvd, FL", "Marketing", 520025),
    ]
    .into_iter()
    .map(|(id, name, email, phone, address, category, cents)| Vendor {
        id,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        category: category.into(),
        total_spent: money(cents),
        status: ContactStatus::Active,
    })
    .collect()
}

pub fn budgets() -> Vec<Budget> {
    [(1, 1, 300), (2, 2, 200), (3, 3, 150), (4, 4, 100), (5, 5, 250)]
        .into_iter()
        .map(|(id, category_id, amount)| Budget {
            id,
            category_id,
            monthly_budget: Decimal::from(amount),
        })
        .collect()
}

/// The full sample set shown on first run.
pub fn sample() -> Collections {
    Collections {
        transactions: transactions(),
        categories: categories(),
        accounts: accounts(),
        clients: clients(),
        vendors: vendors(),
        budgets: budgets(),
    }
}

/// What `clear_all` resets to: reference data kept, activity emptied.
pub fn cleared() -> Collections {
    Collections {
        categories: categories(),
        accounts: accounts(),
        ..Collections::default()
    }
}
