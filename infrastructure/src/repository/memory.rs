//! In-memory [`ExpenseRepository`] seeded with demo data.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use expense_domain::{
    Amount, Category, CategoryId, DEFAULT_CURRENCY, Expense, ExpenseFilter, ExpenseId,
    ExpenseRepository, ExpenseStatus, ExpenseSummary, ExpenseUpdate, NewExpense,
    RepositoryError, User, UserId,
};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    users: Vec<User>,
    next_id: i64,
}

impl Store {
    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn expense_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    fn active_category(&self, id: CategoryId) -> Result<&Category, RepositoryError> {
        self.category(id)
            .filter(|c| c.is_active)
            .ok_or_else(|| RepositoryError::Validation(format!("Unknown category: {id}")))
    }

    /// Move a submitted expense to a reviewed status.
    fn review(&mut self, id: ExpenseId, reviewer: UserId, status: ExpenseStatus) -> bool {
        let reviewer_name = self.user(reviewer).map(|u| u.name.clone());
        let Some(expense) = self.expense_mut(id) else {
            return false;
        };
        if !expense.status.awaits_review() {
            return false;
        }
        expense.status = status;
        expense.reviewed_by = Some(reviewer);
        expense.reviewer_name = reviewer_name;
        expense.reviewed_at = Some(Utc::now());
        true
    }
}

/// Thread-safe in-memory expense store.
///
/// Enforces the lifecycle `Draft → Submitted → Approved | Rejected`:
/// drafts can be edited, deleted and submitted; only submitted expenses can
/// be reviewed. Operations on an unknown id or in the wrong state return
/// `Ok(false)`.
#[derive(Debug)]
pub struct InMemoryExpenseRepository {
    store: RwLock<Store>,
}

impl Default for InMemoryExpenseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExpenseRepository {
    /// Empty repository with the standard categories and no users or expenses.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                categories: default_categories(),
                next_id: 1,
                ..Store::default()
            }),
        }
    }

    /// Repository seeded with two users and four sample expenses.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let users = demo_users(now);
        let categories = default_categories();

        let alice = &users[0];
        let category_name = |id: i64| {
            categories
                .iter()
                .find(|c| c.id == CategoryId(id))
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };
        let seed = |id: i64,
                    category: i64,
                    status: ExpenseStatus,
                    pence: i64,
                    (year, month, day): (i32, u32, u32),
                    description: &str| Expense {
            id: ExpenseId(id),
            user_id: alice.id,
            user_name: alice.name.clone(),
            email: alice.email.clone(),
            category_id: CategoryId(category),
            category_name: category_name(category),
            status,
            amount: Amount::from_pence(pence),
            currency: DEFAULT_CURRENCY.to_string(),
            expense_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            description: Some(description.to_string()),
            receipt_file: None,
            submitted_at: (status != ExpenseStatus::Draft).then_some(now),
            reviewed_by: None,
            reviewer_name: None,
            reviewed_at: None,
            created_at: now,
        };

        let mut expenses = vec![
            seed(1, 1, ExpenseStatus::Submitted, 12_000, (2024, 1, 15), "Taxi to client site"),
            seed(2, 2, ExpenseStatus::Submitted, 6_900, (2023, 1, 10), "Client lunch"),
            seed(3, 3, ExpenseStatus::Approved, 9_950, (2023, 12, 4), "Office supplies"),
            seed(4, 1, ExpenseStatus::Approved, 1_920, (2023, 12, 18), "Transport"),
        ];
        let manager = &users[1];
        for expense in expenses.iter_mut().filter(|e| e.status == ExpenseStatus::Approved) {
            expense.reviewed_by = Some(manager.id);
            expense.reviewer_name = Some(manager.name.clone());
            expense.reviewed_at = Some(now);
        }

        Self {
            store: RwLock::new(Store {
                next_id: expenses.len() as i64 + 1,
                expenses,
                categories,
                users,
            }),
        }
    }
}

fn default_categories() -> Vec<Category> {
    ["Travel", "Meals", "Supplies", "Accommodation", "Other"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Category {
            id: CategoryId(id),
            name: name.to_string(),
            is_active: true,
        })
        .collect()
}

fn demo_users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            name: "Alice Example".to_string(),
            email: "alice@example.co.uk".to_string(),
            role_id: 1,
            role_name: "Employee".to_string(),
            manager_id: Some(UserId(2)),
            manager_name: Some("Bob Manager".to_string()),
            is_active: true,
            created_at: now,
        },
        User {
            id: UserId(2),
            name: "Bob Manager".to_string(),
            email: "bob.manager@example.co.uk".to_string(),
            role_id: 2,
            role_name: "Manager".to_string(),
            manager_id: None,
            manager_name: None,
            is_active: true,
            created_at: now,
        },
    ]
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, RepositoryError> {
        let store = self.store.read().await;
        let mut expenses: Vec<Expense> = store
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.expense_date.cmp(&a.expense_date).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseId, RepositoryError> {
        expense
            .validate()
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut store = self.store.write().await;
        let category_name = store.active_category(expense.category_id)?.name.clone();
        let user = store
            .user(expense.user_id)
            .cloned()
            .ok_or_else(|| RepositoryError::Validation(format!("Unknown user: {}", expense.user_id)))?;

        let id = ExpenseId(store.next_id);
        store.next_id += 1;
        store.expenses.push(Expense {
            id,
            user_id: user.id,
            user_name: user.name,
            email: user.email,
            category_id: expense.category_id,
            category_name,
            status: ExpenseStatus::Draft,
            amount: expense.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            expense_date: expense.expense_date,
            description: expense.description,
            receipt_file: None,
            submitted_at: None,
            reviewed_by: None,
            reviewer_name: None,
            reviewed_at: None,
            created_at: Utc::now(),
        });
        debug!(expense_id = %id, "Created draft expense");
        Ok(id)
    }

    async fn update_expense(&self, update: ExpenseUpdate) -> Result<bool, RepositoryError> {
        update
            .validate()
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut store = self.store.write().await;
        let category_name = store.active_category(update.category_id)?.name.clone();
        let Some(expense) = store.expense_mut(update.expense_id) else {
            return Ok(false);
        };
        if !expense.is_editable() {
            return Ok(false);
        }
        expense.category_id = update.category_id;
        expense.category_name = category_name;
        expense.amount = update.amount;
        expense.expense_date = update.expense_date;
        expense.description = update.description;
        Ok(true)
    }

    async fn delete_expense(&self, id: ExpenseId) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        let before = store.expenses.len();
        store.expenses.retain(|e| !(e.id == id && e.is_editable()));
        Ok(store.expenses.len() < before)
    }

    async fn submit_expense(&self, id: ExpenseId) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        let Some(expense) = store.expense_mut(id) else {
            return Ok(false);
        };
        if expense.status != ExpenseStatus::Draft {
            return Ok(false);
        }
        expense.status = ExpenseStatus::Submitted;
        expense.submitted_at = Some(Utc::now());
        Ok(true)
    }

    async fn approve_expense(
        &self,
        id: ExpenseId,
        reviewer: UserId,
    ) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.review(id, reviewer, ExpenseStatus::Approved))
    }

    async fn reject_expense(
        &self,
        id: ExpenseId,
        reviewer: UserId,
    ) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.review(id, reviewer, ExpenseStatus::Rejected))
    }

    async fn list_pending_expenses(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let mut filter = ExpenseFilter::new().with_status(ExpenseStatus::Submitted.as_str());
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            filter = filter.with_category(category);
        }
        self.list_expenses(&filter).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.categories.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn list_statuses(&self) -> Result<Vec<ExpenseStatus>, RepositoryError> {
        Ok(ExpenseStatus::ALL.to_vec())
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.users.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.user(id).cloned())
    }

    async fn expense_summary(
        &self,
        user: Option<UserId>,
    ) -> Result<Vec<ExpenseSummary>, RepositoryError> {
        let store = self.store.read().await;
        let mut summary = Vec::new();
        for status in ExpenseStatus::ALL {
            let amounts: Vec<Amount> = store
                .expenses
                .iter()
                .filter(|e| e.status == status && user.is_none_or(|u| e.user_id == u))
                .map(|e| e.amount)
                .collect();
            if amounts.is_empty() {
                continue;
            }
            summary.push(ExpenseSummary {
                status_name: status.as_str().to_string(),
                expense_count: amounts.len(),
                total_amount: amounts.into_iter().sum(),
            });
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_expense(category: i64, pence: i64) -> NewExpense {
        NewExpense {
            user_id: UserId(1),
            category_id: CategoryId(category),
            amount: Amount::from_pence(pence),
            expense_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: Some("Train ticket".to_string()),
        }
    }

    #[tokio::test]
    async fn test_demo_data() {
        let repo = InMemoryExpenseRepository::with_demo_data();
        let all = repo.list_expenses(&ExpenseFilter::new()).await.unwrap();
        assert_eq!(all.len(), 4);
        // Newest first
        assert_eq!(all[0].id, ExpenseId(1));

        let pending = repo.list_pending_expenses(None).await.unwrap();
        let ids: Vec<_> = pending.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);

        let travel = repo.list_pending_expenses(Some("travel")).await.unwrap();
        assert_eq!(travel.len(), 1);
        assert_eq!(travel[0].category_name, "Travel");
    }

    #[tokio::test]
    async fn test_create_starts_as_draft() {
        let repo = InMemoryExpenseRepository::with_demo_data();
        let id = repo.create_expense(new_expense(2, 1_250)).await.unwrap();
        assert_eq!(id, ExpenseId(5));

        let created = repo.get_expense(id).await.unwrap().unwrap();
        assert_eq!(created.status, ExpenseStatus::Draft);
        assert_eq!(created.category_name, "Meals");
        assert_eq!(created.user_name, "Alice Example");
        assert_eq!(created.currency, "GBP");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category_and_zero_amount() {
        let repo = InMemoryExpenseRepository::with_demo_data();
        assert!(matches!(
            repo.create_expense(new_expense(99, 100)).await,
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            repo.create_expense(new_expense(1, 0)).await,
            Err(RepositoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_review_only_from_submitted() {
        let repo = InMemoryExpenseRepository::with_demo_data();

        assert!(repo.approve_expense(ExpenseId(1), UserId(2)).await.unwrap());
        let approved = repo.get_expense(ExpenseId(1)).await.unwrap().unwrap();
        assert_eq!(approved.status, ExpenseStatus::Approved);
        assert_eq!(approved.reviewer_name.as_deref(), Some("Bob Manager"));
        assert!(approved.reviewed_at.is_some());

        // Already reviewed
        assert!(!repo.reject_expense(ExpenseId(1), UserId(2)).await.unwrap());
        // Unknown id
        assert!(!repo.approve_expense(ExpenseId(404), UserId(2)).await.unwrap());
        // Drafts cannot be reviewed
        let draft = repo.create_expense(new_expense(1, 500)).await.unwrap();
        assert!(!repo.reject_expense(draft, UserId(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_draft_lifecycle() {
        let repo = InMemoryExpenseRepository::new();
        assert!(matches!(
            repo.create_expense(new_expense(1, 500)).await,
            Err(RepositoryError::Validation(_))
        ));

        let repo = InMemoryExpenseRepository::with_demo_data();
        let id = repo.create_expense(new_expense(1, 500)).await.unwrap();
        let update = ExpenseUpdate {
            expense_id: id,
            category_id: CategoryId(4),
            amount: Amount::from_pence(750),
            expense_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            description: None,
        };
        assert!(repo.update_expense(update.clone()).await.unwrap());
        assert_eq!(
            repo.get_expense(id).await.unwrap().unwrap().category_name,
            "Accommodation"
        );

        assert!(repo.submit_expense(id).await.unwrap());
        assert!(!repo.submit_expense(id).await.unwrap());
        assert!(!repo.update_expense(update).await.unwrap());
        assert!(!repo.delete_expense(id).await.unwrap());

        let other = repo.create_expense(new_expense(5, 100)).await.unwrap();
        assert!(repo.delete_expense(other).await.unwrap());
        assert!(repo.get_expense(other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summary_in_lifecycle_order() {
        let repo = InMemoryExpenseRepository::with_demo_data();
        let summary = repo.expense_summary(None).await.unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].status_name, "Submitted");
        assert_eq!(summary[0].expense_count, 2);
        assert_eq!(summary[0].total_amount, Amount::from_pence(18_900));
        assert_eq!(summary[1].status_name, "Approved");
        assert_eq!(summary[1].total_amount, Amount::from_pence(11_870));

        assert!(repo.expense_summary(Some(UserId(2))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reference_data() {
        let repo = InMemoryExpenseRepository::with_demo_data();
        let categories = repo.list_categories().await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[3].name, "Accommodation");
        assert_eq!(repo.list_statuses().await.unwrap().len(), 4);
        assert_eq!(repo.list_users().await.unwrap().len(), 2);
        assert_eq!(
            repo.get_user(UserId(2)).await.unwrap().unwrap().role_name,
            "Manager"
        );
    }
}
