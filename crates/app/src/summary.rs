//! Cart and booking summaries for the terminal.

use std::io::{self, Write};

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use salon_booking::{
    booking::{BookingRecord, Confirmation, PaymentMethod, PaymentStatus},
    cart::CartStore,
    catalog::Salon,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Format an amount in Indian rupees, e.g. `₹1,250.00`.
pub fn format_price(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::INR).to_string()
}

/// Format a number of minutes as `45 min` or `1h 30m`.
pub fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes} min"),
        (hours, 0) => format!("{hours}h"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

/// Write the cart as a table followed by its totals.
///
/// # Errors
///
/// Returns an error when `out` cannot be written to.
pub fn write_cart(out: &mut impl Write, cart: &CartStore) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Service ID", "Service", "Salon", "Qty", "Price", "Subtotal", "Time"]);

    for item in cart.items() {
        let quantity = item.quantity().get();

        builder.push_record([
            item.service_id().to_string(),
            item.name().to_string(),
            item.salon_name().to_string(),
            quantity.to_string(),
            format_price(item.unit_price()),
            format_price(item.subtotal()),
            format_minutes(u64::from(item.duration_minutes()) * u64::from(quantity)),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Items:    {}", cart.get_item_count())?;
    writeln!(out, "Duration: {}", format_minutes(cart.total_duration()))?;
    writeln!(out, "Total:    {}", format_price(cart.get_total()))
}

/// Write the outcome of a finished booking.
///
/// # Errors
///
/// Returns an error when `out` cannot be written to.
pub fn write_confirmation(out: &mut impl Write, confirmation: &Confirmation) -> io::Result<()> {
    let booking = &confirmation.booking;

    if confirmation.is_confirmed() {
        writeln!(out, "Booking confirmed.")?;
    } else {
        writeln!(out, "Booking created, but the payment was not completed.")?;
    }

    if let Some(code) = &booking.confirmation_code {
        writeln!(out, "Confirmation code: {code}")?;
    }

    if let Some(salon) = &booking.salon {
        writeln!(out, "Salon:   {}", salon.name)?;
    }

    writeln!(
        out,
        "When:    {} at {}",
        booking.booking_date,
        booking.booking_time.strftime("%H:%M")
    )?;

    match (booking.payment_method, &confirmation.payment) {
        (PaymentMethod::AtShop, _) => writeln!(out, "Payment: at the shop")?,
        (PaymentMethod::Online, Some(payment)) => {
            let status = match payment.status {
                PaymentStatus::Success => "paid",
                PaymentStatus::Failed => "failed",
                PaymentStatus::Pending => "pending",
            };

            write!(out, "Payment: online, {status}")?;

            if let Some(transaction) = &payment.transaction_id {
                write!(out, " ({transaction})")?;
            }

            writeln!(out)?;
        }
        (PaymentMethod::Online, None) => writeln!(out, "Payment: online, not started")?,
    }

    if let Some(amount) = confirmation
        .payment
        .as_ref()
        .and_then(|payment| payment.amount)
        .or(booking.total_amount)
    {
        writeln!(out, "Total:   {}", format_price(amount))?;
    }

    Ok(())
}

/// Write the customer's bookings as a table.
///
/// # Errors
///
/// Returns an error when `out` cannot be written to.
pub fn write_bookings(out: &mut impl Write, bookings: &[BookingRecord]) -> io::Result<()> {
    if bookings.is_empty() {
        return writeln!(out, "No bookings found");
    }

    let mut builder = Builder::default();

    builder.push_record(["Booking ID", "Code", "Salon", "When", "Status", "Payment", "Total"]);

    for booking in bookings {
        let payment = match (booking.payment_status.as_deref(), booking.payment_method) {
            (Some("paid"), _) => "Paid".to_string(),
            (Some("pending") | None, PaymentMethod::AtShop) => "Pay at shop".to_string(),
            (Some(status), _) => status.to_string(),
            (None, PaymentMethod::Online) => "online".to_string(),
        };

        builder.push_record([
            booking.id.to_string(),
            booking.confirmation_code.clone().unwrap_or_default(),
            booking
                .salon
                .as_ref()
                .map_or_else(String::new, |salon| salon.name.clone()),
            format!(
                "{} {}",
                booking.booking_date,
                booking.booking_time.strftime("%H:%M")
            ),
            booking.status.clone().unwrap_or_default(),
            payment,
            booking.total_amount.map_or_else(String::new, format_price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(6..), Alignment::right());

    writeln!(out, "{table}")
}

/// Write salon listings as a table.
///
/// # Errors
///
/// Returns an error when `out` cannot be written to.
pub fn write_salons(out: &mut impl Write, salons: &[Salon]) -> io::Result<()> {
    if salons.is_empty() {
        return writeln!(out, "No salons found");
    }

    let mut builder = Builder::default();

    builder.push_record(["Salon ID", "Name", "Address", "City", "Phone"]);

    for salon in salons {
        builder.push_record([
            salon.id.to_string(),
            salon.name.clone(),
            salon.address.clone().unwrap_or_default(),
            salon.city.clone().unwrap_or_default(),
            salon.phone_number.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::{date, time};
    use salon_booking::{
        booking::{BookingRecord, PaymentRecord},
        catalog::{GenderCategory, Salon, Service},
        ids::{BookingUuid, SalonUuid, ServiceUuid},
        prompt::FixedAnswer,
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minutes_read_naturally() {
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(95), "1h 35m");
    }

    #[tokio::test]
    async fn cart_table_lists_items_and_totals() -> TestResult {
        let salon = Salon::new(SalonUuid::new(), "Glow Studio");
        let service = Service {
            id: ServiceUuid::new(),
            name: "Haircut".to_string(),
            price: "500".to_string(),
            duration: 30,
            gender: GenderCategory::Unisex,
        };
        let mut cart = CartStore::new(Arc::new(MemoryStore::new()), Arc::new(FixedAnswer(true)));

        cart.add_service(&service, &salon).await?;
        cart.add_service(&service, &salon).await?;

        let mut out = Vec::new();

        write_cart(&mut out, &cart)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Haircut"), "missing service name: {text}");
        assert!(text.contains("Glow Studio"), "missing salon name: {text}");
        assert!(text.contains("Items:    2"), "missing item count: {text}");
        assert!(text.contains("Duration: 1h"), "missing duration: {text}");
        assert!(text.contains(&format_price(Decimal::from(1000))), "missing total: {text}");

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let cart = CartStore::new(Arc::new(MemoryStore::new()), Arc::new(FixedAnswer(true)));
        let mut out = Vec::new();

        write_cart(&mut out, &cart)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn failed_online_payment_is_not_confirmed() -> TestResult {
        let confirmation = Confirmation {
            booking: BookingRecord {
                id: BookingUuid::new(),
                confirmation_code: Some("BK-7F3A".to_string()),
                booking_date: date(2026, 10, 20),
                booking_time: time(14, 30, 0, 0),
                payment_method: PaymentMethod::Online,
                total_amount: Some(Decimal::from(850)),
                status: None,
                payment_status: None,
                salon: None,
            },
            payment: Some(PaymentRecord {
                transaction_id: Some("txn_9".to_string()),
                status: PaymentStatus::Failed,
                amount: None,
            }),
        };
        let mut out = Vec::new();

        write_confirmation(&mut out, &confirmation)?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Booking created, but the payment was not completed."), "{text}");
        assert!(text.contains("When:    2026-10-20 at 14:30"), "{text}");
        assert!(text.contains("Payment: online, failed (txn_9)"), "{text}");

        Ok(())
    }

    #[test]
    fn bookings_table_shows_status_and_payment() -> TestResult {
        let booking = BookingRecord {
            id: BookingUuid::new(),
            confirmation_code: Some("BK-7F3A".to_string()),
            booking_date: date(2026, 10, 20),
            booking_time: time(14, 30, 0, 0),
            payment_method: PaymentMethod::AtShop,
            total_amount: Some(Decimal::from(850)),
            status: Some("confirmed".to_string()),
            payment_status: Some("pending".to_string()),
            salon: Some(Salon::new(SalonUuid::new(), "Glow Studio")),
        };
        let mut out = Vec::new();

        write_bookings(&mut out, &[booking])?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("BK-7F3A"), "missing code: {text}");
        assert!(text.contains("Glow Studio"), "missing salon: {text}");
        assert!(text.contains("2026-10-20 14:30"), "missing time: {text}");
        assert!(text.contains("confirmed"), "missing status: {text}");
        assert!(text.contains("Pay at shop"), "missing payment: {text}");

        Ok(())
    }

    #[test]
    fn no_bookings_or_salons_say_so() -> TestResult {
        let mut out = Vec::new();

        write_bookings(&mut out, &[])?;
        write_salons(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "No bookings found\nNo salons found\n");

        Ok(())
    }
}
