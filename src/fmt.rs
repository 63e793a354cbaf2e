/// Format an amount as whole won with thousands separators: 1,234,567원
pub fn won(val: f64) -> String {
    let negative = val < 0.0;
    let int_part = format!("{:.0}", val.abs());

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}원")
    } else {
        format!("{with_commas}원")
    }
}

/// Format a percentage share with one decimal place.
pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}
