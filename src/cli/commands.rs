use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::cli::{output, CliMode, CommandError, LoopControl};
use crate::dday::{
    self, aggregate, aggregate_savings, compute_dday, date_math, dday_label, generate_insights,
    monthly_distribution, savings_plan, share_text, sorted_by_proximity, upcoming_milestones,
    Category, DdayItem,
};
use crate::store::{DdayPatch, DdayStore, NewDday};

const COMMANDS: [&str; 18] = [
    "help",
    "list",
    "add",
    "show",
    "update",
    "saved",
    "delete",
    "between",
    "milestones",
    "stats",
    "insights",
    "monthly",
    "savings",
    "export",
    "today",
    "version",
    "exit",
    "quit",
];

const SUGGESTION_THRESHOLD: f64 = 0.8;

pub struct ShellContext {
    store: DdayStore,
    #[allow(dead_code)]
    mode: CliMode,
}

impl ShellContext {
    pub fn new(store: DdayStore, mode: CliMode) -> Self {
        Self { store, mode }
    }

    pub fn dispatch(&mut self, tokens: &[String]) -> Result<LoopControl, CommandError> {
        let today = today();
        let (command, args) = tokens.split_first().expect("tokens checked non-empty");

        match command.as_str() {
            "help" => print_help(),
            "list" => self.cmd_list(today),
            "add" => self.cmd_add(args)?,
            "show" => self.cmd_show(args, today)?,
            "update" => self.cmd_update(args)?,
            "saved" => self.cmd_saved(args)?,
            "delete" => self.cmd_delete(args, today)?,
            "between" => cmd_between(args)?,
            "milestones" => self.cmd_milestones(today),
            "stats" => self.cmd_stats(today),
            "insights" => self.cmd_insights(today),
            "monthly" => self.cmd_monthly(today),
            "savings" => self.cmd_savings(),
            "export" => self.cmd_export(args, today)?,
            "today" => output::info(format!(
                "{} ({})",
                date_math::format_korean_date(&date_math::format_iso(today)),
                date_math::weekday_korean(&date_math::format_iso(today))
            )),
            "version" => print_version(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => {
                let mut message = format!("Unknown command '{unknown}'.");
                if let Some(candidate) = suggest_command(unknown) {
                    message.push_str(&format!(" Did you mean '{candidate}'?"));
                }
                return Err(CommandError::new(message));
            }
        }

        Ok(LoopControl::Continue)
    }

    fn cmd_list(&self, today: NaiveDate) {
        let sorted = sorted_by_proximity(self.store.items(), today);
        if sorted.is_empty() {
            output::info("No D-Days yet. Use 'add' to create one.");
            return;
        }
        output::section("D-Day 목록");
        for (index, item) in sorted.iter().enumerate() {
            let dday = compute_dday(item, today);
            let mut line = format!(
                "{:>3}. {:<8} {} ({} {})",
                index + 1,
                dday_label(dday),
                item.title,
                date_math::format_korean_date(&item.target_date),
                date_math::weekday_korean(&item.target_date),
            );
            line.push_str(&format!(" [{}]", item.effective_category().label()));
            if let Some(plan) = savings_plan(item, today) {
                line.push_str(&format!(" {}%", plan.progress_percent));
                if plan.days_left > 0 {
                    line.push_str(&format!(" · 하루 {}원", plan.daily_suggestion));
                }
            }
            output::info(line);
        }
    }

    fn cmd_add(&mut self, args: &[String]) -> Result<(), CommandError> {
        let (title, rest) = args
            .split_first()
            .ok_or_else(|| CommandError::new("Usage: add <title> <YYYY-MM-DD> [category] [goal]"))?;
        let (date, rest) = rest
            .split_first()
            .ok_or_else(|| CommandError::new("Usage: add <title> <YYYY-MM-DD> [category] [goal]"))?;
        if title.trim().is_empty() {
            return Err(CommandError::new("Title must not be empty."));
        }
        validate_date(date)?;

        let mut draft = NewDday {
            title: title.clone(),
            target_date: date.clone(),
            ..NewDday::default()
        };
        for arg in rest {
            if let Ok(goal) = arg.parse::<u64>() {
                draft.goal_amount = Some(goal);
            } else if let Some(category) = Category::parse(arg) {
                draft.category = Some(category);
            } else {
                return Err(CommandError::new(format!(
                    "Expected a category ({}) or goal amount, got '{arg}'.",
                    category_ids().join("/")
                )));
            }
        }

        let item = self.store.add(draft)?;
        output::success(format!("D-Day '{}' 추가됨", item.title));
        Ok(())
    }

    fn cmd_show(&self, args: &[String], today: NaiveDate) -> Result<(), CommandError> {
        let item = self.resolve_index(args, today)?.clone();
        let dday = compute_dday(&item, today);
        output::section(&item.title);
        output::info(dday_label(dday));
        output::info(format!(
            "{} ({})",
            date_math::format_korean_date(&item.target_date),
            date_math::weekday_korean(&item.target_date)
        ));
        output::info(format!("카테고리: {}", item.effective_category().label()));
        if let Some(plan) = savings_plan(&item, today) {
            output::info(format!(
                "저축: {} / {}원 ({}%) · 남은 {}원",
                plan.saved_amount, plan.goal_amount, plan.progress_percent, plan.remaining_amount
            ));
            if plan.days_left > 0 {
                output::info(format!(
                    "제안: 하루 {}원 · 주 {}원 · 월 {}원",
                    plan.daily_suggestion, plan.weekly_suggestion, plan.monthly_suggestion
                ));
            }
        }
        Ok(())
    }

    fn cmd_update(&mut self, args: &[String]) -> Result<(), CommandError> {
        let today = today();
        let id = self.resolve_index(args, today)?.id;
        let fields = &args[1..];
        if fields.is_empty() {
            return Err(CommandError::new(
                "Usage: update <n> [title=..] [date=..] [category=..] [goal=..] [saved=..]",
            ));
        }

        let mut patch = DdayPatch::default();
        for field in fields {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| CommandError::new(format!("Expected key=value, got '{field}'.")))?;
            match key {
                "title" => patch.title = Some(value.to_string()),
                "date" => {
                    validate_date(value)?;
                    patch.target_date = Some(value.to_string());
                }
                "category" => {
                    patch.category = Some(Category::parse(value).ok_or_else(|| {
                        CommandError::new(format!(
                            "Unknown category '{value}' (expected {}).",
                            category_ids().join("/")
                        ))
                    })?);
                }
                "goal" => patch.goal_amount = Some(parse_amount(value)?),
                "saved" => patch.saved_amount = Some(parse_amount(value)?),
                other => {
                    return Err(CommandError::new(format!("Unknown field '{other}'.")));
                }
            }
        }

        self.store.update(id, patch)?;
        output::success("D-Day 수정됨");
        Ok(())
    }

    fn cmd_saved(&mut self, args: &[String]) -> Result<(), CommandError> {
        let today = today();
        let id = self.resolve_index(args, today)?.id;
        let amount = args
            .get(1)
            .ok_or_else(|| CommandError::new("Usage: saved <n> <amount>"))?;
        let saved = parse_amount(amount)?;
        self.store.update(
            id,
            DdayPatch {
                saved_amount: Some(saved),
                ..DdayPatch::default()
            },
        )?;
        output::success(format!("저축액 {saved}원으로 수정됨"));
        Ok(())
    }

    fn cmd_delete(&mut self, args: &[String], today: NaiveDate) -> Result<(), CommandError> {
        let item = self.resolve_index(args, today)?;
        let (id, title) = (item.id, item.title.clone());
        self.store.delete(id)?;
        output::success(format!("D-Day '{title}' 삭제됨"));
        Ok(())
    }

    fn cmd_milestones(&self, today: NaiveDate) {
        let milestones = upcoming_milestones(self.store.items(), today);
        if milestones.is_empty() {
            output::info("No upcoming milestones within a year.");
            return;
        }
        output::section("다가오는 기념일");
        for milestone in milestones {
            output::info(format!(
                "D-{} {} · {} ({})",
                milestone.days_until,
                milestone.milestone_name,
                milestone.source_title,
                date_math::format_korean_date(&milestone.milestone_date)
            ));
        }
    }

    fn cmd_stats(&self, today: NaiveDate) {
        let stats = aggregate(self.store.items(), today);
        output::section("D-Day 분석");
        output::info(format!(
            "전체 {} · 다가오는 {} · 지난 {} · 오늘 {}",
            stats.total_ddays, stats.upcoming_ddays, stats.past_ddays, stats.today_ddays
        ));
        for (category, count) in &stats.category_breakdown {
            output::info(format!("  {} {}개", category.label(), count));
        }
        if let Some(nearest) = &stats.nearest {
            output::info(format!(
                "가장 가까운 D-Day: {} {}",
                nearest.title,
                dday_label(compute_dday(nearest, today))
            ));
        }
        if let Some(longest) = &stats.longest_running {
            output::info(format!(
                "가장 오래된 D-Day: {} {}",
                longest.title,
                dday_label(compute_dday(longest, today))
            ));
        }
    }

    fn cmd_insights(&self, today: NaiveDate) {
        let stats = aggregate(self.store.items(), today);
        let insights = generate_insights(self.store.items(), &stats, today);
        if insights.is_empty() {
            output::info("No insights yet.");
            return;
        }
        output::section("인사이트");
        for insight in insights {
            output::info(format!("{}: {}", insight.label, insight.value));
        }
    }

    fn cmd_monthly(&self, today: NaiveDate) {
        output::section("월별 분포");
        for bucket in monthly_distribution(self.store.items(), today) {
            let marker = if bucket.is_current { "*" } else { " " };
            let bar = "▇".repeat(bucket.count.min(20));
            output::info(format!(
                "{marker} {} {:<20} {}개",
                bucket.month, bar, bucket.count
            ));
        }
    }

    fn cmd_savings(&self) {
        match aggregate_savings(self.store.items()) {
            Some(agg) => {
                output::section("저축 현황");
                output::info(format!(
                    "목표 {}건 · 목표액 {}원 · 모은 금액 {}원 · 남은 금액 {}원 · 평균 진행률 {}%",
                    agg.goal_count,
                    agg.total_goal,
                    agg.total_saved,
                    agg.total_remaining,
                    agg.average_progress
                ));
            }
            None => output::info("No savings goals yet."),
        }
    }

    fn cmd_export(&self, args: &[String], today: NaiveDate) -> Result<(), CommandError> {
        let item = self.resolve_index(args, today)?;
        output::info(share_text(item, today));
        Ok(())
    }

    /// Resolves the 1-based index of the proximity-sorted list (the order
    /// `list` prints) back to the stored item.
    fn resolve_index(&self, args: &[String], today: NaiveDate) -> Result<&DdayItem, CommandError> {
        let raw = args
            .first()
            .ok_or_else(|| CommandError::new("Expected an item number (see 'list')."))?;
        let index: usize = raw
            .parse()
            .map_err(|_| CommandError::new(format!("Expected an item number, got '{raw}'.")))?;
        let sorted = sorted_by_proximity(self.store.items(), today);
        let id: Uuid = sorted
            .get(index.wrapping_sub(1))
            .map(|item| item.id)
            .ok_or_else(|| {
                CommandError::new(format!(
                    "No item #{index}; the list has {} item(s).",
                    sorted.len()
                ))
            })?;
        self.store
            .get(id)
            .ok_or_else(|| CommandError::new("Item disappeared mid-command."))
    }
}

fn cmd_between(args: &[String]) -> Result<(), CommandError> {
    let (a, b) = match args {
        [a, b] => (a, b),
        _ => {
            return Err(CommandError::new(
                "Usage: between <YYYY-MM-DD> <YYYY-MM-DD>",
            ))
        }
    };
    validate_date(a)?;
    validate_date(b)?;
    output::info(format!("{}일", dday::days_between(a, b)));
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn validate_date(date: &str) -> Result<(), CommandError> {
    date_math::parse_iso(date)
        .map(|_| ())
        .ok_or_else(|| CommandError::new(format!("Expected YYYY-MM-DD, got '{date}'.")))
}

fn parse_amount(value: &str) -> Result<u64, CommandError> {
    value
        .parse::<u64>()
        .map_err(|_| CommandError::new(format!("Expected a non-negative amount, got '{value}'.")))
}

fn category_ids() -> Vec<&'static str> {
    Category::ALL.iter().map(|c| c.id()).collect()
}

fn suggest_command(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|candidate| (*candidate, strsim::jaro_winkler(input, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}

fn print_help() {
    output::section("Commands");
    output::info("list                          proximity-sorted D-Day list");
    output::info("add <title> <date> [cat] [goal]  create an item");
    output::info("show <n>                      item detail with savings plan");
    output::info("update <n> key=value..        patch title/date/category/goal/saved");
    output::info("saved <n> <amount>            set the saved amount");
    output::info("delete <n>                    remove an item");
    output::info("between <date> <date>         days between two dates");
    output::info("milestones                    upcoming anniversaries within a year");
    output::info("stats | insights | monthly | savings   analytics views");
    output::info("export <n>                    clipboard-ready share text");
    output::info("today | version | help | exit");
}

fn print_version() {
    output::info(format!(
        "dday_core {} ({}, built {} for {})",
        env!("CARGO_PKG_VERSION"),
        env!("DDAY_CORE_BUILD_HASH"),
        env!("DDAY_CORE_BUILD_TIMESTAMP"),
        env!("DDAY_CORE_BUILD_TARGET"),
    ));
    output::info(env!("DDAY_CORE_BUILD_RUSTC"));
}
