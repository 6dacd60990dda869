use super::plan::round_money;

/// Input-assist widget for composing a payment amount through discrete key
/// actions. Purely local; `apply` hands the composed value, clamped to the
/// outstanding balance, to the partial-payment path.
#[derive(Debug)]
pub struct Calculator {
    digits: String,
    max: f64,
}

impl Calculator {
    pub fn new(max: f64) -> Self {
        Self {
            digits: String::new(),
            max,
        }
    }

    pub fn display(&self) -> &str {
        if self.digits.is_empty() {
            "0"
        } else {
            &self.digits
        }
    }

    /// Append a digit or a single decimal point. Anything past two decimal
    /// places is ignored.
    pub fn push_digit(&mut self, ch: char) {
        if ch.is_ascii_digit() {
            if let Some(pos) = self.digits.find('.') {
                if self.digits.len() - pos - 1 >= 2 {
                    return;
                }
            }
            self.digits.push(ch);
        } else if ch == '.' && !self.digits.contains('.') {
            if self.digits.is_empty() {
                self.digits.push('0');
            }
            self.digits.push('.');
        }
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    /// Set the entry to the full outstanding balance.
    pub fn set_max(&mut self) {
        self.digits = format!("{:.2}", self.max);
    }

    /// Add a fixed quick-add increment, clamped to the balance.
    pub fn quick_add(&mut self, step: f64) {
        let value = (self.value() + step).min(self.max);
        self.digits = format!("{:.2}", value);
    }

    pub fn value(&self) -> f64 {
        self.digits.parse().unwrap_or(0.0)
    }

    /// Final composed value, clamped to the balance at currency scale.
    pub fn apply(&self) -> f64 {
        round_money(self.value().min(self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_digits_and_decimal() {
        let mut calc = Calculator::new(100.0);
        for ch in "42.50".chars() {
            calc.push_digit(ch);
        }
        assert_eq!(calc.display(), "42.50");
        assert_eq!(calc.apply(), 42.5);
    }

    #[test]
    fn ignores_second_decimal_point_and_extra_places() {
        let mut calc = Calculator::new(100.0);
        for ch in "1.2.345".chars() {
            calc.push_digit(ch);
        }
        assert_eq!(calc.display(), "1.23");
    }

    #[test]
    fn leading_decimal_gets_a_zero() {
        let mut calc = Calculator::new(100.0);
        calc.push_digit('.');
        calc.push_digit('5');
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn backspace_and_clear() {
        let mut calc = Calculator::new(100.0);
        calc.push_digit('7');
        calc.push_digit('5');
        calc.backspace();
        assert_eq!(calc.display(), "7");
        calc.clear();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.value(), 0.0);
    }

    #[test]
    fn set_max_uses_balance() {
        let mut calc = Calculator::new(63.4);
        calc.set_max();
        assert_eq!(calc.display(), "63.40");
    }

    #[test]
    fn quick_add_clamps_at_balance() {
        let mut calc = Calculator::new(25.0);
        calc.quick_add(20.0);
        calc.quick_add(20.0);
        assert_eq!(calc.apply(), 25.0);
    }

    #[test]
    fn apply_clamps_oversized_entry() {
        let mut calc = Calculator::new(60.0);
        for ch in "150".chars() {
            calc.push_digit(ch);
        }
        assert_eq!(calc.apply(), 60.0);
    }
}
