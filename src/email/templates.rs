pub fn render_welcome(name: &str, base_url: &str, site_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome to {site_name}</h2>
    <p>Hi {name},</p>
    <p>Your account has been created. You can book a table any time:</p>
    <p><a href="{base_url}/bookings/new" style="display: inline-block; padding: 10px 20px; background: #7b3f00; color: white; text-decoration: none; border-radius: 4px;">Book a Table</a></p>
    <p style="color: #666; font-size: 14px;">If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_booking_cancellation(
    name: &str,
    date_display: &str,
    guests: i32,
    special_requests: &str,
    site_name: &str,
) -> String {
    let requests = if special_requests.is_empty() {
        "None"
    } else {
        special_requests
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Your booking has been cancelled</h2>
    <p>Hi {name},</p>
    <p>This confirms the cancellation of your booking at {site_name}:</p>
    <ul>
        <li>Date: {date_display}</li>
        <li>Guests: {guests}</li>
        <li>Special requests: {requests}</li>
    </ul>
    <p style="color: #666; font-size: 14px;">We hope to see you another time.</p>
</body>
</html>"#
    )
}
