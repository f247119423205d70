use campo_core::{CellView, Coord, Coord2, Game, GameConfig, GameState};
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub(crate) enum Msg {
    Reveal(Coord2),
    Flag(Coord2),
    Rows(String),
    Cols(String),
    Mines(String),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: Coord,
    col: Coord,
    cell: CellView,
    cb_reveal: Callback<Coord2>,
    cb_flag: Callback<Coord2>,
}

#[function_component(Cell)]
fn cell_component(props: &CellProps) -> Html {
    use CellView::*;

    let CellProps {
        row,
        col,
        cell,
        cb_reveal,
        cb_flag,
    } = props.clone();
    let class = classes!(
        "cell",
        match cell {
            Hidden => classes!("closed"),
            Flagged => classes!("closed", "flag"),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Mine => classes!("open", "mine"),
        }
    );
    let content = match cell {
        Hidden | Revealed(0) => String::new(),
        Flagged => "👍".to_string(),
        Revealed(count) => count.to_string(),
        Mine => "💣".to_string(),
    };

    let onclick = Callback::from(move |_| cb_reveal.emit((row, col)));
    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        cb_flag.emit((row, col));
    });

    html! {
        <td {class} {onclick} {oncontextmenu}>{content}</td>
    }
}

/// Helper function to use JavaScript's Math.random
fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Numeric input coercion: parse failures keep the previous value, silently.
fn coerce_input<T: core::str::FromStr>(value: &str, prev: T) -> T {
    value.trim().parse().unwrap_or(prev)
}

fn input_value(e: &InputEvent) -> String {
    e.target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

pub(crate) struct App {
    game: Game,
}

impl App {
    fn apply_config(&mut self, config: GameConfig) -> bool {
        if config != self.game.config() {
            self.game.set_config(config, js_random_seed());
        }
        // always re-render so a rejected input snaps back to the held value
        true
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            game: Game::new(GameConfig::default(), js_random_seed()),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Reveal(coords) => {
                log::debug!("open cell: {:?}", coords);
                self.game.reveal(coords).map_or(false, |r| r.has_update())
            }
            Flag(coords) => {
                log::debug!("flag cell: {:?}", coords);
                self.game
                    .toggle_flag(coords)
                    .map_or(false, |r| r.has_update())
            }
            Rows(value) => {
                let config = self.game.config();
                let rows = coerce_input(&value, config.size.0);
                self.apply_config(GameConfig::new((rows, config.size.1), config.mines))
            }
            Cols(value) => {
                let config = self.game.config();
                let cols = coerce_input(&value, config.size.1);
                self.apply_config(GameConfig::new((config.size.0, cols), config.mines))
            }
            Mines(value) => {
                let config = self.game.config();
                let mines = coerce_input(&value, config.mines);
                self.apply_config(GameConfig::new(config.size, mines))
            }
            NewGame => {
                self.game.reset(js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (rows, cols) = self.game.size();
        let config = self.game.config();
        let cb_reveal = ctx.link().callback(Msg::Reveal);
        let cb_flag = ctx.link().callback(Msg::Flag);
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let cb_rows = ctx.link().callback(|e: InputEvent| Msg::Rows(input_value(&e)));
        let cb_cols = ctx.link().callback(|e: InputEvent| Msg::Cols(input_value(&e)));
        let cb_mines = ctx.link().callback(|e: InputEvent| Msg::Mines(input_value(&e)));

        let status_class = classes!(
            "status",
            match self.game.state() {
                GameState::NotStarted => "not-started",
                GameState::InProgress => "in-progress",
                GameState::Lost => "lost",
            }
        );
        let status = if self.game.game_over() { "💀" } else { "😎" };

        html! {
            <div class={"campo"} oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <table class={"grid"}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let cell = self.game.cell_view((row, col));
                                        html! {
                                            <Cell {row} {col} {cell}
                                                cb_reveal={cb_reveal.clone()}
                                                cb_flag={cb_flag.clone()}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <div class={"params"}>
                    <label>{"rows:"}
                        <input id={"rows"} value={config.size.0.to_string()} oninput={cb_rows}/>
                    </label>
                    <label>{"columns:"}
                        <input id={"cols"} value={config.size.1.to_string()} oninput={cb_cols}/>
                    </label>
                    <label>{"bombs:"}
                        <input id={"bombs"} value={config.mines.to_string()} oninput={cb_mines}/>
                    </label>
                    <div class={status_class} onclick={cb_new_game}>{status}</div>
                </div>
            </div>
        }
    }
}
