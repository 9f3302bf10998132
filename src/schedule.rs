// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};

use crate::models::{Frequency, RecurringInvestmentPlan};

/// Whether `plan` should execute on `today`. Pure date arithmetic, no I/O.
///
/// Monthly plans match on day-of-month, so a plan started on the 31st never
/// matches in shorter months. Yearly plans match on day-of-year, which
/// drifts by a day across leap years. Both are known limitations of the
/// plan format and are left uncorrected.
pub fn is_due_today(plan: &RecurringInvestmentPlan, today: NaiveDate) -> bool {
    if today < plan.start_date {
        return false;
    }
    match plan.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => (today - plan.start_date).num_days() % 7 == 0,
        Frequency::Monthly => today.day() == plan.start_date.day(),
        Frequency::Yearly => today.ordinal() == plan.start_date.ordinal(),
    }
}
