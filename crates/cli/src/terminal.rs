use fivedice_core::{
    score, AudioCue, Category, Cue, DiceSet, Display, InputClosed, Player, Prompt, PromptDialog,
    TurnCommand, TurnInput, TurnView, N_DICE,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

const HELP_LINES: &[&str] = &[
    "commands:",
    "  <category id or number>  score the current dice there (e.g. full_house, 9)",
    "  bonus                    arm your one-time x2 multiplier for this turn",
    "  catch                    catch the falling bonus token",
    "  sheet                    show the score sheet",
    "  help                     show this help",
    "  quit                     leave the game",
    "rerolls: list 1-based dice positions, e.g. 1,3 or 2-4; Enter keeps all",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Turn(TurnCommand),
    Sheet,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let text = line.trim().to_ascii_lowercase();
    match text.as_str() {
        "" => Err("enter a category, or 'help'".to_string()),
        "bonus" | "x2" => Ok(Command::Turn(TurnCommand::RequestMultiplier)),
        "catch" | "c" => Ok(Command::Turn(TurnCommand::CatchToken)),
        "sheet" | "s" => Ok(Command::Sheet),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => {
            if let Ok(number) = text.parse::<usize>() {
                return number
                    .checked_sub(1)
                    .and_then(Category::from_slot)
                    .map(|category| Command::Turn(TurnCommand::Select(category)))
                    .ok_or_else(|| format!("no category numbered {number}"));
            }
            match Category::from_id(&text) {
                Some(category) if category.is_selectable() => {
                    Ok(Command::Turn(TurnCommand::Select(category)))
                }
                Some(category) => Err(format!(
                    "{} is a total row, not a category",
                    category.display_name()
                )),
                None => Err(format!("unknown command '{text}'")),
            }
        }
    }
}

/// Expands positions and ranges such as `1,3 4-5`, each within `1..=max`.
fn parse_positions(args: &[&str], max: usize) -> Result<Vec<usize>, String> {
    let mut positions = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((start, end)) = part.split_once('-') {
                let start = start
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range start".to_string())?;
                let end = end
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "invalid range end".to_string())?;
                if start > end {
                    return Err("range start larger than end".to_string());
                }
                positions.extend(start..=end);
            } else {
                let position = part
                    .parse::<usize>()
                    .map_err(|_| format!("invalid position '{part}'"))?;
                positions.push(position);
            }
        }
    }
    if positions.iter().any(|position| !(1..=max).contains(position)) {
        return Err(format!("dice positions run from 1 to {max}"));
    }
    Ok(positions)
}

/// Parses 1-based dice positions into zero-based indices. Empty input keeps all dice.
fn parse_reroll(line: &str) -> Result<Vec<usize>, String> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let mut positions = parse_positions(&args, N_DICE)?;
    positions.sort_unstable();
    positions.dedup();
    Ok(positions.into_iter().map(|position| position - 1).collect())
}

/// Line-based frontend over any reader/writer pair.
pub struct TerminalFrontend<R, W> {
    input: R,
    out: W,
    players: Vec<String>,
    cells: BTreeMap<(usize, Category), i64>,
    wagers: BTreeMap<usize, i64>,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            players: Vec::new(),
            cells: BTreeMap::new(),
            wagers: BTreeMap::new(),
        }
    }

    pub fn set_players(&mut self, players: &[Player]) {
        self.players = players.iter().map(|player| player.name.clone()).collect();
    }

    pub fn banner(&mut self) {
        self.say("Five Dice. Type 'help' during a turn for commands.");
    }

    fn say(&mut self, text: &str) {
        if writeln!(self.out, "{text}").is_err() {
            log::warn!("terminal output closed");
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, InputClosed> {
        if write!(self.out, "{prompt} ").and_then(|_| self.out.flush()).is_err() {
            log::warn!("terminal output closed");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(InputClosed),
            Ok(_) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                log::warn!("read failed: {err}");
                Err(InputClosed)
            }
        }
    }

    fn print_help(&mut self) {
        for line in HELP_LINES {
            self.say(line);
        }
    }

    fn print_sheet(&mut self) {
        let mut header = format!("{:<16}", "");
        for name in &self.players {
            header.push_str(&format!("{name:>10.10}"));
        }
        let mut rows = vec![header];
        for category in Category::ALL {
            let mut row = format!("{:<16}", category.display_name());
            for player in 0..self.players.len() {
                match self.cells.get(&(player, category)) {
                    Some(value) => row.push_str(&format!("{value:>10}")),
                    None => row.push_str(&format!("{:>10}", "-")),
                }
            }
            rows.push(row);
        }
        if !self.wagers.is_empty() {
            let mut row = format!("{:<16}", "Bonus Game");
            for player in 0..self.players.len() {
                match self.wagers.get(&player) {
                    Some(value) => row.push_str(&format!("{value:>+10}")),
                    None => row.push_str(&format!("{:>10}", "-")),
                }
            }
            rows.push(row);
        }
        for row in rows {
            self.say(&row);
        }
    }

    fn print_options(&mut self, view: &TurnView<'_>) {
        let mut lines = Vec::new();
        for category in &view.open_categories {
            let Some(slot) = category.slot() else {
                continue;
            };
            let projected = score(*category, &view.dice).unwrap_or(0);
            lines.push(format!(
                "  {:>2}) {:<16} {:>3}  ({})",
                slot + 1,
                category.display_name(),
                projected,
                category.id()
            ));
        }
        if view.multiplier_requested {
            lines.push("  x2 armed for this turn".to_string());
        } else if view.multiplier_available {
            lines.push("  'bonus' arms your x2 multiplier".to_string());
        }
        if let Some(token) = view.token.as_ref() {
            if token.is_falling() {
                lines.push(format!(
                    "  bonus token falling at {}/{}: type 'catch'",
                    token.position(),
                    token.bound()
                ));
            } else {
                lines.push(format!("  bonus token: {:?}", token.state()));
            }
        }
        for line in lines {
            self.say(&line);
        }
    }
}

impl<R: BufRead, W: Write> Display for TerminalFrontend<R, W> {
    fn show_dice(&mut self, dice: &DiceSet) {
        let row: Vec<String> = dice
            .values()
            .iter()
            .enumerate()
            .map(|(idx, value)| format!("[{}] {}", idx + 1, value))
            .collect();
        self.say(&format!("Dice: {}", row.join("  ")));
    }

    fn show_message(&mut self, text: &str) {
        self.say(text);
    }

    fn update_score_cell(&mut self, category: Category, player: usize, value: i64) {
        log::debug!("cell {} for player {player} = {value}", category.id());
        self.cells.insert((player, category), value);
    }

    fn update_wager_cell(&mut self, player: usize, value: i64) {
        log::debug!("bonus game for player {player} = {value}");
        self.wagers.insert(player, value);
    }
}

impl<R: BufRead, W: Write> TurnInput for TerminalFrontend<R, W> {
    fn wait_for_roll_confirmation(&mut self, player: &Player) -> Result<(), InputClosed> {
        loop {
            let line = self.ask(&format!("{}, press Enter to roll:", player.name))?;
            match line.trim() {
                "quit" | "q" | "exit" => return Err(InputClosed),
                "sheet" | "s" => self.print_sheet(),
                "help" | "h" | "?" => self.print_help(),
                _ => return Ok(()),
            }
        }
    }

    fn wait_for_reroll_selection(&mut self, view: &TurnView<'_>) -> Result<Vec<usize>, InputClosed> {
        loop {
            let line = self.ask(&format!(
                "Re-roll which dice? ({} left, Enter keeps all):",
                view.rerolls_left
            ))?;
            match line.trim() {
                "quit" | "q" | "exit" => return Err(InputClosed),
                "sheet" | "s" => {
                    self.print_sheet();
                    continue;
                }
                "help" | "h" | "?" => {
                    self.print_help();
                    continue;
                }
                _ => {}
            }
            match parse_reroll(&line) {
                Ok(indices) => return Ok(indices),
                Err(err) => self.say(&format!("error: {err}")),
            }
        }
    }

    fn wait_for_category_command(&mut self, view: &TurnView<'_>) -> Result<TurnCommand, InputClosed> {
        self.print_options(view);
        loop {
            let line = self.ask("Category:")?;
            match parse_command(&line) {
                Ok(Command::Turn(command)) => return Ok(command),
                Ok(Command::Sheet) => self.print_sheet(),
                Ok(Command::Help) => self.print_help(),
                Ok(Command::Quit) => return Err(InputClosed),
                Err(err) => self.say(&format!("error: {err}")),
            }
        }
    }
}

impl<R: BufRead, W: Write> PromptDialog for TerminalFrontend<R, W> {
    fn read_int(&mut self, prompt: &Prompt) -> Result<i64, InputClosed> {
        loop {
            let line = self.ask(&prompt.text)?;
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a whole number."),
            }
        }
    }

    fn read_line(&mut self, prompt: &Prompt) -> Result<String, InputClosed> {
        self.ask(&prompt.text)
    }

    fn show_error(&mut self, text: &str) {
        self.say(&format!("error: {text}"));
    }
}

impl<R: BufRead, W: Write> AudioCue for TerminalFrontend<R, W> {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {cue:?}");
        if matches!(cue, Cue::InvalidInput | Cue::GameWon) && write!(self.out, "\x07").is_err() {
            log::warn!("terminal output closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fivedice_core::{BonusEventConfig, GameConfig, PromptKind, RoundEngine};
    use std::io::Cursor;

    fn frontend(input: &str) -> TerminalFrontend<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalFrontend::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(frontend: &TerminalFrontend<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&frontend.out).to_string()
    }

    #[test]
    fn commands_parse() {
        assert_eq!(
            parse_command("full_house"),
            Ok(Command::Turn(TurnCommand::Select(Category::FullHouse)))
        );
        assert_eq!(
            parse_command(" 13 "),
            Ok(Command::Turn(TurnCommand::Select(Category::SumAll)))
        );
        assert_eq!(
            parse_command("BONUS"),
            Ok(Command::Turn(TurnCommand::RequestMultiplier))
        );
        assert_eq!(parse_command("catch"), Ok(Command::Turn(TurnCommand::CatchToken)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("14").is_err());
        assert!(parse_command("0").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn total_rows_are_not_categories() {
        for text in ["total", "upper_bonus", "lower_subtotal", "upper_subtotal"] {
            let err = parse_command(text).unwrap_err();
            assert!(err.contains("total row"), "{text}: {err}");
        }
    }

    #[test]
    fn typing_a_total_row_reprompts_the_turn() {
        let config = GameConfig {
            rounds: 1,
            bonus_event: BonusEventConfig {
                spawn_chance: 0.0,
                ..BonusEventConfig::default()
            },
            ..GameConfig::default()
        };
        let mut engine =
            RoundEngine::new(config, Player::named_list(&["Ann"]), 9).expect("engine");
        let mut frontend = frontend("\n\n\ntotal\nchance\n2\n");
        let (outcomes, standings) = engine.play(&mut frontend).expect("game");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].category, Category::SumAll);
        assert_eq!(standings.totals[0].wager, 0);
        let text = output(&frontend);
        assert!(text.contains("error: Total is a total row, not a category"));
        assert!(text.contains("Ann bonus game: +0"));
    }

    #[test]
    fn reroll_positions_are_one_based() {
        assert_eq!(parse_reroll(""), Ok(Vec::new()));
        assert_eq!(parse_reroll("1,3"), Ok(vec![0, 2]));
        assert_eq!(parse_reroll("2-4 4"), Ok(vec![1, 2, 3]));
        assert!(parse_reroll("0").is_err());
        assert!(parse_reroll("6").is_err());
        assert!(parse_reroll("3-1").is_err());
        assert!(parse_reroll("x").is_err());
    }

    #[test]
    fn read_int_reprompts_until_number() {
        let mut frontend = frontend("two\n2\n");
        let prompt = Prompt::new(PromptKind::PlayerCount, "How many?");
        assert_eq!(frontend.read_int(&prompt), Ok(2));
        assert!(output(&frontend).contains("Please enter a whole number."));
    }

    #[test]
    fn end_of_input_closes() {
        let mut frontend = frontend("");
        let prompt = Prompt::new(PromptKind::PlayerName { index: 0 }, "Name:");
        assert_eq!(frontend.read_line(&prompt), Err(InputClosed));
        let player = Player::new(0, "Ann");
        assert_eq!(frontend.wait_for_roll_confirmation(&player), Err(InputClosed));
    }

    #[test]
    fn sheet_lists_recorded_cells() {
        let mut frontend = frontend("");
        frontend.set_players(&[Player::new(0, "Ann")]);
        frontend.update_score_cell(Category::FullHouse, 0, 25);
        frontend.print_sheet();
        let text = output(&frontend);
        assert!(text.contains("Full House"));
        assert!(text.contains("25"));
        assert!(text.contains("Ann"));
        assert!(!text.contains("Bonus Game"));
        frontend.update_wager_cell(0, -12);
        frontend.print_sheet();
        let text = output(&frontend);
        assert!(text.contains("Bonus Game"));
        assert!(text.contains("-12"));
    }
}
