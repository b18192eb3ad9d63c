//! Terminal side of the table: prompts for the human seat and a plain-text
//! renderer for round events.
//!
//! Everything here validates input before it reaches the engine, so the
//! engine only ever sees legal cards.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use hearts_core::game::round::{RoundEvent, RoundObserver, RoundOutcome};
use hearts_core::model::card::Card;
use hearts_core::model::controller::{Human, MoveView, SeatController, TradeView};
use hearts_core::model::hand::Hand;
use hearts_core::model::player::PlayerPosition;
use tracing::warn;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn ask_name(&mut self) -> io::Result<String> {
        loop {
            write!(self.output, "What's your name? ")?;
            self.output.flush()?;
            let line = self.read_line()?;
            let name = line.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
    }

    pub fn ask_move(&mut self, view: &MoveView<'_>, options: &[Card]) -> io::Result<Card> {
        writeln!(self.output)?;
        writeln!(self.output, "Trick {} of 13", view.trick_number + 1)?;
        if view.prior_plays.is_empty() {
            writeln!(self.output, "You lead.")?;
        } else {
            let played = view
                .prior_plays
                .iter()
                .map(|play| format!("{} {}", play.position, play.card))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.output, "On the table: {played}")?;
        }
        writeln!(self.output, "Your hand: {}", format_cards(view.hand.cards()))?;
        writeln!(self.output, "Legal: {}", format_cards(options))?;

        loop {
            write!(self.output, "Which card will {} play? ", view.name)?;
            self.output.flush()?;
            let line = self.read_line()?;
            match line.parse::<Card>() {
                Ok(card) if options.contains(&card) => return Ok(card),
                Ok(card) if view.hand.contains(card) => {
                    writeln!(self.output, "{card} is not a legal play right now.")?;
                }
                Ok(card) => writeln!(self.output, "Sorry, you aren't holding {card}.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    pub fn ask_trade(&mut self, view: &TradeView<'_>) -> io::Result<[Card; 3]> {
        writeln!(self.output)?;
        writeln!(self.output, "Your hand: {}", format_cards(view.hand.cards()))?;
        loop {
            write!(
                self.output,
                "Pick three cards to pass to {} (e.g. QS 10H 2C): ",
                view.target
            )?;
            self.output.flush()?;
            let line = self.read_line()?;
            match parse_trade(&line, view.hand) {
                Ok(cards) => return Ok(cards),
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line)
    }
}

/// Parses three distinct held cards separated by spaces or commas.
pub fn parse_trade(line: &str, hand: &Hand) -> Result<[Card; 3], String> {
    let mut cards = Vec::with_capacity(3);
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let card = token.parse::<Card>().map_err(|err| err.to_string())?;
        if !hand.contains(card) {
            return Err(format!("Sorry, you aren't holding {card}."));
        }
        if cards.contains(&card) {
            return Err(format!("{card} was picked twice."));
        }
        cards.push(card);
    }
    match cards.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(format!("Pick exactly three cards, got {}.", cards.len())),
    }
}

/// Wraps a prompter in a [`Human`] controller.
///
/// If input closes mid-game the seat falls back to the first legal card and
/// the first three cards of its hand.
pub fn human_controller<R, W>(prompter: Prompter<R, W>) -> Box<dyn SeatController>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    let shared = Rc::new(RefCell::new(prompter));
    let for_trade = Rc::clone(&shared);
    Box::new(Human::new(
        move |view: &MoveView<'_>, options: &[Card]| match shared
            .borrow_mut()
            .ask_move(view, options)
        {
            Ok(card) => Some(card),
            Err(err) => {
                warn!(error = %err, "no move from terminal, playing first legal card");
                options.first().copied()
            }
        },
        move |view: &TradeView<'_>| match for_trade.borrow_mut().ask_trade(view) {
            Ok(cards) => Some(cards),
            Err(err) => {
                warn!(error = %err, "no trade from terminal, passing first three cards");
                view.hand.first_three()
            }
        },
    ))
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints round events. Individual plays are shown only when `show_plays`
/// is set; trick results, trades for the human and scores always are.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    names: [String; 4],
    human: Option<PlayerPosition>,
    show_plays: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, names: [String; 4], human: Option<PlayerPosition>, show_plays: bool) -> Self {
        Self {
            out,
            names,
            human,
            show_plays,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, seat: PlayerPosition) -> &str {
        &self.names[seat.index()]
    }

    fn render(&mut self, event: &RoundEvent) -> io::Result<()> {
        match event {
            RoundEvent::Dealt { .. } => writeln!(self.out, "\nCards are dealt.")?,
            RoundEvent::TradesExchanged { received } => {
                if let Some(seat) = self.human {
                    writeln!(
                        self.out,
                        "You received {}.",
                        format_cards(&received[seat.index()])
                    )?;
                }
            }
            RoundEvent::CardPlayed { seat, card, .. } => {
                if self.show_plays {
                    let name = self.name(*seat).to_string();
                    writeln!(self.out, "{name} plays {card}.")?;
                }
            }
            RoundEvent::TrickCompleted(summary) => {
                let name = self.name(summary.winner).to_string();
                let cards = summary
                    .plays
                    .iter()
                    .map(|play| play.card)
                    .collect::<Vec<_>>();
                writeln!(
                    self.out,
                    "Trick {}: {} takes {} ({} point{}).",
                    summary.trick_number + 1,
                    name,
                    format_cards(&cards),
                    summary.points,
                    if summary.points == 1 { "" } else { "s" }
                )?;
            }
            RoundEvent::HeartsBroken { .. } => writeln!(self.out, "Hearts are broken!")?,
            RoundEvent::MoonShot { shooter } => {
                let name = self.name(*shooter).to_string();
                writeln!(self.out, "{name} shot the moon!")?;
            }
            RoundEvent::RoundComplete(outcome) => self.render_scores(outcome)?,
        }
        Ok(())
    }

    fn render_scores(&mut self, outcome: &RoundOutcome) -> io::Result<()> {
        writeln!(self.out, "\nRound scores:")?;
        for result in &outcome.results {
            writeln!(
                self.out,
                "  {:<12} {:>2} ({} cards taken)",
                result.name,
                result.score,
                result.won_cards.len()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> RoundObserver for ConsoleRenderer<W> {
    fn notify(&mut self, event: &RoundEvent) {
        if let Err(err) = self.render(event) {
            warn!(error = %err, "failed to render round event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleRenderer, Prompter, parse_trade};
    use hearts_core::game::round::{RoundEvent, RoundObserver};
    use hearts_core::model::card::Card;
    use hearts_core::model::controller::{MoveView, TradeView};
    use hearts_core::model::hand::Hand;
    use hearts_core::model::player::PlayerPosition;
    use hearts_core::model::rank::Rank;
    use hearts_core::model::suit::Suit;
    use hearts_core::model::trick::Play;
    use std::io::Cursor;

    fn hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Clubs),
            Card::QUEEN_OF_SPADES,
            Card::new(Rank::Ace, Suit::Hearts),
        ])
    }

    #[test]
    fn move_prompt_repeats_until_legal() {
        let hand = hand();
        let prior = [Play {
            position: PlayerPosition::North,
            card: Card::new(Rank::Ten, Suit::Clubs),
        }];
        let view = MoveView {
            seat: PlayerPosition::East,
            name: "Ada",
            hand: &hand,
            led_suit: Some(Suit::Clubs),
            prior_plays: &prior,
            hearts_broken: false,
            trick_number: 2,
            score: 0,
        };
        let options = hand.legal_options(view.led_suit, false);
        let input = Cursor::new("zz\nKD\nQS\n9c\n");
        let mut prompter = Prompter::new(input, Vec::new());

        let card = prompter.ask_move(&view, &options).unwrap();
        assert_eq!(card, Card::new(Rank::Nine, Suit::Clubs));

        let transcript = String::from_utf8(prompter.into_output()).unwrap();
        assert!(transcript.contains("aren't holding KD"));
        assert!(transcript.contains("QS is not a legal play"));
        assert!(transcript.contains("On the table: North 10C"));
    }

    #[test]
    fn trade_prompt_rejects_duplicates_then_accepts() {
        let hand = hand();
        let view = TradeView {
            seat: PlayerPosition::South,
            name: "Ada",
            hand: &hand,
            target: PlayerPosition::West,
        };
        let input = Cursor::new("QS QS AH\nQS, AH, 4C\n");
        let mut prompter = Prompter::new(input, Vec::new());
        let cards = prompter.ask_trade(&view).unwrap();
        assert_eq!(
            cards,
            [
                Card::QUEEN_OF_SPADES,
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::Four, Suit::Clubs)
            ]
        );
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let err = prompter.ask_name().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn trade_parsing_counts_cards() {
        let hand = hand();
        assert!(parse_trade("QS AH", &hand).is_err());
        assert!(parse_trade("QS AH 4C 9C", &hand).is_err());
        assert!(parse_trade("QS AH 2D", &hand).is_err());
        assert!(parse_trade(" 4c  9c qs ", &hand).is_ok());
    }

    #[test]
    fn renderer_announces_moon_shot_by_name() {
        let names = ["Ada", "Alfie", "Mercy", "Tobi"].map(String::from);
        let mut renderer = ConsoleRenderer::new(Vec::new(), names, None, false);
        renderer.notify(&RoundEvent::MoonShot {
            shooter: PlayerPosition::South,
        });
        renderer.notify(&RoundEvent::CardPlayed {
            trick_number: 0,
            seat: PlayerPosition::North,
            card: Card::TWO_OF_CLUBS,
        });
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "Mercy shot the moon!\n");
    }
}
