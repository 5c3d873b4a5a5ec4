//! Domain entity representing a service ticket.

use chrono::NaiveDate;

/// A service visit for a customer.
///
/// `mechanic_ids` and `inventory_ids` are the current members of the two
/// association tables, sorted ascending and free of duplicates.
#[derive(Debug, Clone)]
pub struct ServiceTicket {
    pub id: i64,
    pub service_date: NaiveDate,
    pub customer_id: i64,
    pub mechanic_ids: Vec<i64>,
    pub inventory_ids: Vec<i64>,
}

impl ServiceTicket {
    pub fn has_mechanic(&self, mechanic_id: i64) -> bool {
        self.mechanic_ids.binary_search(&mechanic_id).is_ok()
    }

    pub fn has_part(&self, inventory_id: i64) -> bool {
        self.inventory_ids.binary_search(&inventory_id).is_ok()
    }
}

/// Input data for creating a service ticket.
#[derive(Debug, Clone)]
pub struct NewServiceTicket {
    pub service_date: NaiveDate,
    pub customer_id: i64,
}

/// Partial update of a service ticket.
#[derive(Debug, Clone, Default)]
pub struct ServiceTicketPatch {
    pub service_date: Option<NaiveDate>,
    pub customer_id: Option<i64>,
}

/// Bulk change to the mechanics assigned to a ticket.
///
/// Ids that do not reference an existing mechanic are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MechanicEdit {
    pub add_ids: Vec<i64>,
    pub remove_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(mechanic_ids: Vec<i64>, inventory_ids: Vec<i64>) -> ServiceTicket {
        ServiceTicket {
            id: 1,
            service_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            customer_id: 7,
            mechanic_ids,
            inventory_ids,
        }
    }

    #[test]
    fn test_membership_checks() {
        let t = ticket(vec![2, 5, 9], vec![3]);

        assert!(t.has_mechanic(5));
        assert!(!t.has_mechanic(4));
        assert!(t.has_part(3));
        assert!(!t.has_part(1));
    }

    #[test]
    fn test_empty_associations() {
        let t = ticket(vec![], vec![]);
        assert!(!t.has_mechanic(1));
        assert!(!t.has_part(1));
    }
}
